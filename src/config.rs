use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Labsight";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Feature contract for the report classifier, in column order.
/// The artifact and the retraining loop both depend on this ordering.
pub const REPORT_FEATURES: [&str; 4] = ["glucose", "hemoglobin", "cholesterol", "wbc"];

/// Physiological-normal defaults substituted when a feature is absent,
/// in `REPORT_FEATURES` order.
pub const FEATURE_DEFAULTS: [f64; 4] = [100.0, 14.0, 200.0, 7000.0];

/// Trees per forest. Fixed configuration, never tuned per call.
pub const N_ESTIMATORS: usize = 100;

/// Seed for deterministic training runs.
pub const RANDOM_SEED: u64 = 42;

/// Depth cap for individual decision trees.
pub const MAX_TREE_DEPTH: usize = 16;

/// Minimum samples required before a node may split.
pub const MIN_SAMPLES_SPLIT: usize = 2;

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "info,labsight=debug"
}

/// Get the application data directory (~/Labsight on all platforms)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Get the models directory
pub fn models_dir() -> PathBuf {
    app_data_dir().join("models")
}

/// Active report-classifier artifact path
pub fn model_artifact_path() -> PathBuf {
    models_dir().join("report_classifier.json")
}

/// Get the training data directory
pub fn data_dir() -> PathBuf {
    app_data_dir().join("data")
}

/// Original labeled heart-disease training set
pub fn training_dataset_path() -> PathBuf {
    data_dir().join("heart_disease_processed.csv")
}

/// Report/feedback log database
pub fn database_path() -> PathBuf {
    app_data_dir().join("app.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn models_dir_under_app_data() {
        let models = models_dir();
        assert!(models.starts_with(app_data_dir()));
        assert!(models.ends_with("models"));
    }

    #[test]
    fn artifact_path_is_json() {
        let path = model_artifact_path();
        assert_eq!(path.extension().unwrap(), "json");
    }

    #[test]
    fn feature_contract_matches_defaults() {
        assert_eq!(REPORT_FEATURES.len(), FEATURE_DEFAULTS.len());
    }
}
