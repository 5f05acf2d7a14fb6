//! Classifier-backed analysis strategy.
//!
//! Builds the fixed 4-feature vector, runs multi-label prediction, and maps
//! each predicted label back to the measurement its display value comes from.
//! The rule-based strategy keeps separate thresholds and defaults; the two
//! are deliberately not unified.

use crate::config;
use crate::ml::artifact::ClassifierArtifact;
use crate::models::fields::StructuredFields;
use crate::models::finding::Finding;

use super::messages::MessageTemplates;

/// Build `[glucose, hemoglobin, cholesterol, wbc]`, substituting the fixed
/// physiological-normal default for any family absent from the fields.
pub fn feature_vector(fields: &StructuredFields) -> [f64; 4] {
    let mut features = config::FEATURE_DEFAULTS;
    for (i, key) in config::REPORT_FEATURES.iter().enumerate() {
        if let Some(measurement) = fields.get(*key) {
            features[i] = measurement.value;
        }
    }
    features
}

/// Source measurement for a label's display value: feature column index
/// plus display unit. Unmapped labels report no value.
fn label_source(label: &str) -> Option<(usize, &'static str)> {
    match label {
        "diabetes" | "prediabetes" => Some((0, "mg/dL")),
        "anemia" | "polycythemia" => Some((1, "g/dL")),
        "high_cholesterol" | "heart_disease" => Some((2, "mg/dL")),
        "leukopenia" | "infection" => Some((3, "cells/μL")),
        _ => None,
    }
}

/// Predict conditions from extracted fields using the loaded artifact.
pub fn analyze_with_classifier(
    artifact: &ClassifierArtifact,
    fields: &StructuredFields,
) -> Vec<Finding> {
    let features = feature_vector(fields);
    let labels = artifact.predict(&features);

    if labels.is_empty() {
        return vec![Finding::general(MessageTemplates::no_findings_classifier())];
    }

    labels
        .iter()
        .map(|label| match label_source(label) {
            Some((column, unit)) => {
                let value = features[column];
                let message = MessageTemplates::for_label(label, value)
                    .unwrap_or_else(|| MessageTemplates::detected_condition(label));
                Finding::abnormal(label.clone(), value, unit, message)
            }
            None => Finding {
                kind: label.clone(),
                value: None,
                unit: Some("unknown".into()),
                message: MessageTemplates::detected_condition(label),
                is_abnormal: true,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::artifact::ClassifierArtifact;
    use crate::ml::binarizer::LabelBinarizer;
    use crate::ml::forest::MultiOutputForest;
    use crate::models::fields::Measurement;

    #[test]
    fn feature_vector_uses_defaults_for_missing_families() {
        let fields = StructuredFields::new();
        assert_eq!(feature_vector(&fields), [100.0, 14.0, 200.0, 7000.0]);
    }

    #[test]
    fn feature_vector_prefers_extracted_values() {
        let mut fields = StructuredFields::new();
        fields.insert("glucose".into(), Measurement::new(180.0, "mg/dl"));
        fields.insert("wbc".into(), Measurement::without_unit(12000.0));
        assert_eq!(feature_vector(&fields), [180.0, 14.0, 200.0, 12000.0]);
    }

    /// Artifact trained on a cleanly separable rule: heart_disease iff
    /// cholesterol is far above 240.
    fn cholesterol_artifact() -> ClassifierArtifact {
        let mut x = Vec::new();
        let mut label_sets = Vec::new();
        for chol in [150.0, 160.0, 170.0, 180.0, 190.0, 200.0] {
            x.push(vec![100.0, 14.0, chol, 7000.0]);
            label_sets.push(Vec::new());
        }
        for chol in [280.0, 290.0, 300.0, 310.0, 320.0, 330.0] {
            x.push(vec![100.0, 14.0, chol, 7000.0]);
            label_sets.push(vec!["heart_disease".to_string()]);
        }
        let binarizer = LabelBinarizer::fit(&label_sets);
        let y = binarizer.transform(&label_sets);
        let model = MultiOutputForest::fit(&x, &y, 25, 42);
        ClassifierArtifact { binarizer, model }
    }

    #[test]
    fn predicted_label_maps_to_source_measurement() {
        let artifact = cholesterol_artifact();
        let mut fields = StructuredFields::new();
        fields.insert("cholesterol".into(), Measurement::new(305.0, "mg/dl"));

        let findings = analyze_with_classifier(&artifact, &fields);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, "heart_disease");
        assert!(findings[0].is_abnormal);
        assert_eq!(findings[0].value, Some(305.0));
        assert_eq!(findings[0].unit.as_deref(), Some("mg/dL"));
        assert!(findings[0].message.contains("heart disease"));
    }

    #[test]
    fn empty_prediction_yields_single_general_finding() {
        let artifact = cholesterol_artifact();
        let mut fields = StructuredFields::new();
        fields.insert("cholesterol".into(), Measurement::new(155.0, "mg/dl"));

        let findings = analyze_with_classifier(&artifact, &fields);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, "general");
        assert!(!findings[0].is_abnormal);
        assert_eq!(
            findings[0].message,
            MessageTemplates::no_findings_classifier()
        );
    }

    #[test]
    fn missing_cholesterol_defaults_to_normal_side() {
        let artifact = cholesterol_artifact();
        let findings = analyze_with_classifier(&artifact, &StructuredFields::new());
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].is_abnormal);
    }
}
