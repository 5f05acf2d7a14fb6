//! Retraining entry point: fold accumulated report feedback into the
//! training set and replace the active classifier artifact.
//!
//! Invoked with no arguments. Prints whether retraining ran or was
//! skipped; exits non-zero only on hard failure (e.g. the original
//! dataset is unreadable).

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use labsight::config;
use labsight::db;
use labsight::retrain::{retrain, RetrainOutcome, RetrainPaths};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let paths = RetrainPaths::from_config();
    let conn = match db::open_database(&config::database_path()) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("Retraining failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    match retrain(&conn, &paths, None) {
        Ok(RetrainOutcome::Retrained {
            original_rows,
            feedback_rows,
        }) => {
            println!("Retraining completed: {original_rows} original + {feedback_rows} feedback samples.");
            ExitCode::SUCCESS
        }
        Ok(RetrainOutcome::Skipped) => {
            println!("Retraining skipped (no feedback data).");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Retraining failed: {err}");
            ExitCode::FAILURE
        }
    }
}
