//! Loader for the original labeled training set.
//!
//! Fixed columns: glucose, hemoglobin, cholesterol, wbc, heart_disease.
//! An unreadable or malformed dataset is the one hard failure of the
//! retraining job.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("training dataset unreadable: {0}")]
    Csv(#[from] csv::Error),
}

/// One labeled row of the heart-disease training set.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingRow {
    pub glucose: f64,
    pub hemoglobin: f64,
    pub cholesterol: f64,
    pub wbc: f64,
    pub heart_disease: u8,
}

impl TrainingRow {
    /// Feature vector in the fixed column order.
    pub fn features(&self) -> Vec<f64> {
        vec![self.glucose, self.hemoglobin, self.cholesterol, self.wbc]
    }

    /// Label set for binarization: positive rows carry `heart_disease`.
    pub fn label_set(&self) -> Vec<String> {
        if self.heart_disease == 1 {
            vec!["heart_disease".to_string()]
        } else {
            Vec::new()
        }
    }
}

pub fn load_training_rows(path: &Path) -> Result<Vec<TrainingRow>, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
