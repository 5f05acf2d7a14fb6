//! End-to-end report processing: normalize → extract → analyze, plus the
//! persisted snapshot handed to the storage collaborator.

use chrono::Utc;
use uuid::Uuid;

use crate::analysis::FindingsEngine;
use crate::models::feedback::ReportLog;
use crate::models::fields::StructuredFields;
use crate::models::finding::Finding;

use super::{extract, normalize};

/// Output of one pipeline run over raw report text.
#[derive(Debug, Clone)]
pub struct ProcessedReport {
    pub cleaned_text: String,
    pub fields: StructuredFields,
    pub findings: Vec<Finding>,
}

/// Run the full pipeline over raw text. Pure given the engine's loaded
/// model; safe to invoke concurrently across reports.
pub fn process_report(engine: &FindingsEngine, raw_text: &str) -> ProcessedReport {
    let cleaned_text = normalize::normalize(raw_text);
    let fields = extract::extract(&cleaned_text);
    let findings = engine.analyze(&fields);

    tracing::debug!(
        fields = fields.len(),
        findings = findings.len(),
        abnormal = findings.iter().filter(|f| f.is_abnormal).count(),
        "report processed"
    );

    ProcessedReport {
        cleaned_text,
        fields,
        findings,
    }
}

/// Build the immutable log row for a processed report. The structured
/// output and analysis are serialized verbatim; later retraining reads the
/// snapshot exactly as written here.
pub fn build_report_log(filename: &str, raw_text: &str, processed: &ProcessedReport) -> ReportLog {
    ReportLog {
        id: Uuid::new_v4(),
        filename: filename.to_string(),
        raw_text: raw_text.to_string(),
        cleaned_text: processed.cleaned_text.clone(),
        structured_output: serde_json::to_string(&processed.fields)
            .unwrap_or_else(|_| "{}".to_string()),
        analysis: serde_json::to_string(&processed.findings).unwrap_or_else(|_| "[]".to_string()),
        created_at: Utc::now().naive_utc(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_engine() -> FindingsEngine {
        let dir = tempfile::tempdir().unwrap();
        FindingsEngine::load(&dir.path().join("absent.json"))
    }

    #[test]
    fn full_pipeline_flags_abnormal_glucose() {
        let engine = rules_engine();
        let processed = process_report(&engine, "Glucose: 180mg/dl, Hemoglobin: 14 g/dL");

        assert_eq!(processed.fields["glucose"].value, 180.0);
        let abnormal: Vec<_> = processed.findings.iter().filter(|f| f.is_abnormal).collect();
        assert_eq!(abnormal.len(), 1);
        assert_eq!(abnormal[0].kind, "glucose");
    }

    #[test]
    fn normal_report_gets_single_general_finding() {
        let engine = rules_engine();
        let processed = process_report(
            &engine,
            "Hemoglobin: 14 g/dL, Glucose: 90 mg/dL, Cholesterol: 180 mg/dL",
        );
        assert_eq!(processed.findings.len(), 1);
        assert!(!processed.findings[0].is_abnormal);
    }

    #[test]
    fn report_log_snapshot_is_valid_json() {
        let engine = rules_engine();
        let processed = process_report(&engine, "Cholesterol: 250 mg/dl");
        let log = build_report_log("report.pdf", "Cholesterol: 250 mg/dl", &processed);

        let fields: StructuredFields = serde_json::from_str(&log.structured_output).unwrap();
        assert_eq!(fields["cholesterol"].value, 250.0);
        let findings: Vec<Finding> = serde_json::from_str(&log.analysis).unwrap();
        assert!(findings[0].is_abnormal);
    }
}
