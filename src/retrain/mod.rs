pub mod job;

pub use job::{retrain, train_from_originals, RetrainError, RetrainOutcome, RetrainPaths};
