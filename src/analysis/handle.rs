//! Atomically swappable handle to the loaded classifier artifact.
//!
//! Inference takes a snapshot (an `Arc` clone under a read lock) and works
//! against that immutable model for the whole call; a retrain swaps the
//! inner pointer wholesale. Readers observe either the old model or the new
//! one, never a partial state.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::ml::artifact::{ArtifactError, ClassifierArtifact};

#[derive(Clone)]
pub struct ModelHandle {
    inner: Arc<RwLock<Arc<ClassifierArtifact>>>,
}

impl ModelHandle {
    pub fn new(artifact: ClassifierArtifact) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(artifact))),
        }
    }

    /// Immutable snapshot of the current model.
    pub fn snapshot(&self) -> Arc<ClassifierArtifact> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the model wholesale.
    pub fn swap(&self, artifact: ClassifierArtifact) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(artifact);
    }

    /// Reload the artifact from disk and swap it in.
    pub fn reload_from(&self, path: &Path) -> Result<(), ArtifactError> {
        let artifact = ClassifierArtifact::load(path)?;
        self.swap(artifact);
        Ok(())
    }
}
