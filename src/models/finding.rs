use serde::{Deserialize, Serialize};

/// One reported observation (normal or abnormal) derived from structured
/// fields. Both analysis strategies produce this exact shape, and the
/// serialized list is persisted verbatim as a report's analysis blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub message: String,
    pub is_abnormal: bool,
}

impl Finding {
    /// An abnormal finding carrying the measurement that triggered it.
    pub fn abnormal(
        kind: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            value: Some(value),
            unit: Some(unit.into()),
            message: message.into(),
            is_abnormal: true,
        }
    }

    /// The synthetic non-abnormal entry emitted when no individual
    /// abnormality was detected.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            kind: "general".into(),
            value: None,
            unit: None,
            message: message.into(),
            is_abnormal: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_as_type() {
        let finding = Finding::abnormal("glucose", 180.0, "mg/dL", "high");
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["type"], "glucose");
        assert_eq!(json["is_abnormal"], true);
    }

    #[test]
    fn general_finding_omits_value_and_unit() {
        let finding = Finding::general("No significant abnormalities detected.");
        let json = serde_json::to_string(&finding).unwrap();
        assert!(!json.contains("\"value\""));
        assert!(!json.contains("\"unit\""));
        assert!(json.contains("\"is_abnormal\":false"));
    }

    #[test]
    fn round_trips_through_json() {
        let finding = Finding::abnormal("wbc", 12000.0, "cells/μL", "high wbc");
        let back: Finding =
            serde_json::from_str(&serde_json::to_string(&finding).unwrap()).unwrap();
        assert_eq!(back, finding);
    }
}
