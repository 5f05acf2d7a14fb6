use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which kind of prior log a correction refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogType {
    Report,
    Symptom,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Symptom => "symptom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "report" => Some(Self::Report),
            "symptom" => Some(Self::Symptom),
            _ => None,
        }
    }
}

/// A human-supplied corrected label attached to a prior automated prediction.
///
/// Report feedback must reference a report log; symptom feedback must
/// reference a symptom log. The storage boundary rejects anything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackCorrection {
    pub log_type: LogType,
    pub original_prediction: String,
    pub corrected_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_log_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom_log_id: Option<Uuid>,
}

/// Persisted snapshot of one analyzed report.
///
/// `structured_output` and `analysis` hold the extractor output and the
/// findings list as JSON text. Once written they are immutable; the
/// retraining loop depends on reading the snapshot exactly as analyzed.
#[derive(Debug, Clone)]
pub struct ReportLog {
    pub id: Uuid,
    pub filename: String,
    pub raw_text: String,
    pub cleaned_text: String,
    pub structured_output: String,
    pub analysis: String,
    pub created_at: NaiveDateTime,
}

/// Persisted symptom submission with its automated prediction.
#[derive(Debug, Clone)]
pub struct SymptomLog {
    pub id: Uuid,
    pub description: String,
    pub prediction: String,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_type_round_trips() {
        assert_eq!(LogType::parse("report"), Some(LogType::Report));
        assert_eq!(LogType::parse("symptom"), Some(LogType::Symptom));
        assert_eq!(LogType::Report.as_str(), "report");
        assert_eq!(LogType::parse("other"), None);
    }

    #[test]
    fn log_type_serde_is_snake_case() {
        let json = serde_json::to_string(&LogType::Report).unwrap();
        assert_eq!(json, "\"report\"");
    }

    #[test]
    fn correction_optional_fields_omitted() {
        let fb = FeedbackCorrection {
            log_type: LogType::Report,
            original_prediction: "heart_disease".into(),
            corrected_label: "no_condition".into(),
            user_comment: None,
            report_log_id: Some(Uuid::new_v4()),
            symptom_log_id: None,
        };
        let json = serde_json::to_string(&fb).unwrap();
        assert!(!json.contains("symptom_log_id"));
        assert!(!json.contains("user_comment"));
    }
}
