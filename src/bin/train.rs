//! Initial training entry point: fit the report classifier from the
//! original labeled dataset alone and write the artifact.
//!
//! Invoked with no arguments. Run once to bootstrap a deployment before
//! any feedback exists; later runs of `retrain` fold feedback in.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use labsight::config;
use labsight::retrain::{train_from_originals, RetrainPaths};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let paths = RetrainPaths::from_config();
    match train_from_originals(&paths, None) {
        Ok(rows) => {
            println!("Training completed: {rows} samples.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Training failed: {err}");
            ExitCode::FAILURE
        }
    }
}
