//! The trained classifier artifact: label binarizer and predictor stored as
//! one serialized container, so loading needs no bespoke adapters.
//!
//! Saving writes to a temp file in the destination directory and renames it
//! over the target. A concurrent loader sees either the previous artifact
//! or the new one, never a truncated file.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::binarizer::LabelBinarizer;
use super::forest::MultiOutputForest;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("artifact replace failed: {0}")]
    Replace(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub binarizer: LabelBinarizer,
    pub model: MultiOutputForest,
}

impl ClassifierArtifact {
    pub fn labels(&self) -> &[String] {
        self.binarizer.classes()
    }

    /// Multi-label prediction: feature vector in, label set out.
    pub fn predict(&self, features: &[f64]) -> Vec<String> {
        let row = self.model.predict(features);
        self.binarizer.inverse(&row)
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Atomic replace: write-to-temp-then-rename in the target directory.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let dir = path
            .parent()
            .ok_or_else(|| ArtifactError::Replace("artifact path has no parent directory".into()))?;
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, self)?;
        tmp.flush()?;
        tmp.persist(path)
            .map_err(|e| ArtifactError::Replace(e.to_string()))?;

        tracing::debug!(path = %path.display(), "classifier artifact replaced");
        Ok(())
    }
}
