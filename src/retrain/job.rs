//! Feedback-driven retraining: fold human corrections into the original
//! training set and produce a replacement classifier artifact.
//!
//! Runs as an out-of-band batch job. The only hard failure is an unusable
//! original dataset; individual feedback rows recover locally. With no
//! usable feedback the job is a deliberate no-op and the prior artifact
//! stays in force, byte for byte.

use std::path::PathBuf;

use rusqlite::Connection;
use thiserror::Error;

use crate::analysis::classifier::feature_vector;
use crate::analysis::ModelHandle;
use crate::config;
use crate::db::{self, DatabaseError};
use crate::ml::artifact::{ArtifactError, ClassifierArtifact};
use crate::ml::binarizer::LabelBinarizer;
use crate::ml::dataset::{self, DatasetError, TrainingRow};
use crate::ml::forest::MultiOutputForest;
use crate::models::fields::StructuredFields;

#[derive(Error, Debug)]
pub enum RetrainError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Outcome of one retraining run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrainOutcome {
    /// A fresh model was fitted and the artifact replaced.
    Retrained {
        original_rows: usize,
        feedback_rows: usize,
    },
    /// No usable feedback existed; the prior model remains in force.
    Skipped,
}

/// Filesystem inputs/outputs of the job.
#[derive(Debug, Clone)]
pub struct RetrainPaths {
    pub dataset: PathBuf,
    pub artifact: PathBuf,
}

impl RetrainPaths {
    pub fn from_config() -> Self {
        Self {
            dataset: config::training_dataset_path(),
            artifact: config::model_artifact_path(),
        }
    }
}

/// Corrected-label terms that derive a positive heart-disease row,
/// matched case-insensitively. Anything else is negative.
const POSITIVE_LABELS: [&str; 4] = ["heart_disease", "yes", "true", "1"];

pub fn derive_label(corrected_label: &str) -> u8 {
    u8::from(POSITIVE_LABELS.contains(&corrected_label.to_lowercase().as_str()))
}

/// Rebuild the fixed feature vector from a report's structured snapshot.
/// A snapshot that fails to parse is replaced by the all-default vector
/// and logged; one bad record never aborts the batch.
fn snapshot_features(structured_output: &str) -> [f64; 4] {
    match serde_json::from_str::<StructuredFields>(structured_output) {
        Ok(fields) => feature_vector(&fields),
        Err(err) => {
            tracing::warn!(
                error = %err,
                "unparsable structured snapshot, using default feature vector"
            );
            config::FEATURE_DEFAULTS
        }
    }
}

/// Initial training: fit the classifier from the original dataset alone
/// and write the artifact. Bootstraps a deployment that has no feedback
/// (and therefore no prior model) yet. Returns the number of rows trained.
pub fn train_from_originals(
    paths: &RetrainPaths,
    handle: Option<&ModelHandle>,
) -> Result<usize, RetrainError> {
    let original = dataset::load_training_rows(&paths.dataset)?;
    tracing::info!(rows = original.len(), "original training set loaded");

    let x: Vec<Vec<f64>> = original.iter().map(TrainingRow::features).collect();
    let label_sets: Vec<Vec<String>> = original.iter().map(TrainingRow::label_set).collect();
    fit_and_replace(&x, &label_sets, paths, handle)?;

    tracing::info!(
        rows = original.len(),
        artifact = %paths.artifact.display(),
        "report classifier trained from originals"
    );
    Ok(original.len())
}

/// Retrain the report classifier from the original dataset plus report
/// feedback, replacing the artifact atomically. When `handle` is given,
/// the in-memory model is swapped as well; concurrent inference keeps
/// reading the old snapshot until the swap completes.
pub fn retrain(
    conn: &Connection,
    paths: &RetrainPaths,
    handle: Option<&ModelHandle>,
) -> Result<RetrainOutcome, RetrainError> {
    let original = dataset::load_training_rows(&paths.dataset)?;
    tracing::info!(rows = original.len(), "original training set loaded");

    let joins = db::report_feedback_joins(conn)?;
    if joins.is_empty() {
        tracing::info!("no report feedback available, retraining skipped");
        return Ok(RetrainOutcome::Skipped);
    }
    tracing::info!(rows = joins.len(), "feedback corrections loaded");

    // Row order matters: originals first, feedback appended.
    let mut x: Vec<Vec<f64>> = original.iter().map(TrainingRow::features).collect();
    let mut label_sets: Vec<Vec<String>> = original.iter().map(TrainingRow::label_set).collect();
    for join in &joins {
        x.push(snapshot_features(&join.structured_output).to_vec());
        label_sets.push(if derive_label(&join.corrected_label) == 1 {
            vec!["heart_disease".to_string()]
        } else {
            Vec::new()
        });
    }

    fit_and_replace(&x, &label_sets, paths, handle)?;

    tracing::info!(
        total_rows = x.len(),
        artifact = %paths.artifact.display(),
        "report classifier retrained and replaced"
    );
    Ok(RetrainOutcome::Retrained {
        original_rows: original.len(),
        feedback_rows: joins.len(),
    })
}

/// Fit a fresh forest over the rows, save the paired artifact atomically,
/// and swap the live handle when one is given.
fn fit_and_replace(
    x: &[Vec<f64>],
    label_sets: &[Vec<String>],
    paths: &RetrainPaths,
    handle: Option<&ModelHandle>,
) -> Result<(), RetrainError> {
    let binarizer = LabelBinarizer::fit(label_sets);
    let y = binarizer.transform(label_sets);
    let model = MultiOutputForest::fit(x, &y, config::N_ESTIMATORS, config::RANDOM_SEED);
    let artifact = ClassifierArtifact { binarizer, model };

    artifact.save(&paths.artifact)?;
    if let Some(handle) = handle {
        handle.swap(artifact);
    }
    Ok(())
}
