//! Findings engine: turns structured fields into an ordered findings list.
//!
//! Two interchangeable strategies behind one call surface, selected once at
//! process start depending on whether a trained classifier artifact can be
//! loaded. Callers stay strategy-agnostic; both variants emit the same
//! `Finding` shape.

pub mod classifier;
pub mod handle;
pub mod messages;
pub mod rules;

pub use handle::ModelHandle;

use std::path::Path;

use crate::ml::artifact::ClassifierArtifact;
use crate::models::fields::StructuredFields;
use crate::models::finding::Finding;

pub enum FindingsEngine {
    /// Fixed threshold rules; always available.
    RuleBased,
    /// Trained multi-label classifier behind a swappable handle.
    Classifier(ModelHandle),
}

impl FindingsEngine {
    /// Choose the strategy once, at startup.
    ///
    /// A missing or unreadable artifact is not an error: the engine falls
    /// back to the rule-based strategy and logs why.
    pub fn load(model_path: &Path) -> Self {
        match ClassifierArtifact::load(model_path) {
            Ok(artifact) => {
                tracing::info!(
                    path = %model_path.display(),
                    labels = ?artifact.labels(),
                    "report classifier loaded"
                );
                Self::Classifier(ModelHandle::new(artifact))
            }
            Err(err) => {
                tracing::warn!(
                    path = %model_path.display(),
                    error = %err,
                    "report classifier unavailable, falling back to threshold rules"
                );
                Self::RuleBased
            }
        }
    }

    /// Analyze extracted fields into an ordered findings list.
    ///
    /// Pure given the loaded model; safe to call concurrently.
    pub fn analyze(&self, fields: &StructuredFields) -> Vec<Finding> {
        match self {
            Self::RuleBased => rules::analyze_with_rules(fields),
            Self::Classifier(handle) => {
                let snapshot = handle.snapshot();
                classifier::analyze_with_classifier(&snapshot, fields)
            }
        }
    }

    /// Handle for in-place model replacement, when this engine carries one.
    pub fn model_handle(&self) -> Option<&ModelHandle> {
        match self {
            Self::RuleBased => None,
            Self::Classifier(handle) => Some(handle),
        }
    }
}
