//! Fixed message templates for findings.
//!
//! Wording is part of the persisted analysis blob contract; existing
//! stored reports depend on these exact phrasings.

pub struct MessageTemplates;

/// Render a measurement the way the stored blobs do: a whole-number float
/// keeps its trailing `.0` (180.0 prints as "180.0", not "180").
fn fmt_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl MessageTemplates {
    pub fn anemia(value: f64) -> String {
        format!("Hemoglobin {} → Possible anemia risk", fmt_value(value))
    }

    pub fn polycythemia(value: f64) -> String {
        format!("Hemoglobin {} → Possible polycythemia", fmt_value(value))
    }

    pub fn diabetes(value: f64) -> String {
        format!("Glucose {} → Possible diabetes risk", fmt_value(value))
    }

    pub fn prediabetes(value: f64) -> String {
        format!("Glucose {} → Prediabetic range", fmt_value(value))
    }

    pub fn hypoglycemia(value: f64) -> String {
        format!("Glucose {} → Possible hypoglycemia", fmt_value(value))
    }

    pub fn high_cholesterol(value: f64) -> String {
        format!(
            "Cholesterol {} → High cholesterol (risk of heart disease)",
            fmt_value(value)
        )
    }

    pub fn leukopenia(value: f64) -> String {
        format!("WBC {} → Possible leukopenia (low immunity)", fmt_value(value))
    }

    pub fn infection(value: f64) -> String {
        format!("WBC {} → Possible infection / inflammation", fmt_value(value))
    }

    pub fn heart_disease(value: f64) -> String {
        format!(
            "High cholesterol ({} mg/dL) → Elevated heart disease risk. Consult a cardiologist.",
            fmt_value(value)
        )
    }

    pub fn hypertension(systolic: f64, diastolic: f64) -> String {
        format!(
            "Blood pressure {}/{} → Hypertension risk",
            fmt_value(systolic),
            fmt_value(diastolic)
        )
    }

    pub fn hypotension(systolic: f64, diastolic: f64) -> String {
        format!(
            "Blood pressure {}/{} → Hypotension risk",
            fmt_value(systolic),
            fmt_value(diastolic)
        )
    }

    /// Fallback for a predicted label with no dedicated template.
    pub fn detected_condition(label: &str) -> String {
        format!("Detected condition: {label}")
    }

    /// Synthetic entry when the classifier predicts no label.
    pub fn no_findings_classifier() -> &'static str {
        "No significant abnormalities detected."
    }

    /// Synthetic entry when no threshold rule fired.
    pub fn no_findings_rules() -> &'static str {
        "No critical issues detected with basic rules. Consult a doctor for detailed analysis."
    }

    /// Template for a classifier label, given the display value.
    pub fn for_label(label: &str, value: f64) -> Option<String> {
        let message = match label {
            "diabetes" => Self::diabetes(value),
            "prediabetes" => Self::prediabetes(value),
            "anemia" => Self::anemia(value),
            "polycythemia" => Self::polycythemia(value),
            "high_cholesterol" => Self::high_cholesterol(value),
            "leukopenia" => Self::leukopenia(value),
            "infection" => Self::infection(value),
            "heart_disease" => Self::heart_disease(value),
            _ => return None,
        };
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_have_templates() {
        for label in [
            "diabetes",
            "prediabetes",
            "anemia",
            "polycythemia",
            "high_cholesterol",
            "leukopenia",
            "infection",
            "heart_disease",
        ] {
            assert!(MessageTemplates::for_label(label, 1.0).is_some(), "{label}");
        }
    }

    #[test]
    fn unknown_label_falls_through() {
        assert!(MessageTemplates::for_label("thrombocytopenia", 1.0).is_none());
        assert_eq!(
            MessageTemplates::detected_condition("thrombocytopenia"),
            "Detected condition: thrombocytopenia"
        );
    }

    #[test]
    fn value_is_interpolated() {
        assert_eq!(
            MessageTemplates::anemia(10.5),
            "Hemoglobin 10.5 → Possible anemia risk"
        );
    }

    #[test]
    fn whole_floats_keep_trailing_zero() {
        assert_eq!(
            MessageTemplates::diabetes(180.0),
            "Glucose 180.0 → Possible diabetes risk"
        );
        assert_eq!(
            MessageTemplates::heart_disease(305.0),
            "High cholesterol (305.0 mg/dL) → Elevated heart disease risk. Consult a cardiologist."
        );
        assert_eq!(
            MessageTemplates::hypertension(150.0, 95.0),
            "Blood pressure 150.0/95.0 → Hypertension risk"
        );
    }
}
