//! Deterministic threshold rules, the always-available fallback strategy.
//!
//! One table drives all scalar families. Boundary values are exclusive
//! (hemoglobin 12.0 is normal, 11.9 is not) except where a rule marks its
//! lower bound inclusive (glucose 70 is hypoglycemic); both must stay
//! exactly as written for compatibility with previously persisted analyses.

use crate::models::fields::StructuredFields;
use crate::models::finding::Finding;

use super::messages::MessageTemplates;

/// Threshold rule for one scalar measurement family.
struct FamilyRule {
    kind: &'static str,
    /// Keys checked in order; the first one present supplies the value.
    keys: &'static [&'static str],
    unit: &'static str,
    /// Abnormal when value < threshold (<= when `below_inclusive`).
    below: Option<(f64, fn(f64) -> String)>,
    below_inclusive: bool,
    /// Abnormal when value > threshold.
    above: Option<(f64, fn(f64) -> String)>,
}

const SCALAR_RULES: &[FamilyRule] = &[
    FamilyRule {
        kind: "hemoglobin",
        keys: &["hemoglobin"],
        unit: "g/dL",
        below: Some((12.0, MessageTemplates::anemia)),
        below_inclusive: false,
        above: Some((16.5, MessageTemplates::polycythemia)),
    },
    FamilyRule {
        kind: "glucose",
        keys: &["glucose", "blood sugar"],
        unit: "mg/dL",
        below: Some((70.0, MessageTemplates::hypoglycemia)),
        below_inclusive: true,
        above: Some((126.0, MessageTemplates::diabetes)),
    },
    FamilyRule {
        kind: "cholesterol",
        keys: &["cholesterol"],
        unit: "mg/dL",
        below: None,
        below_inclusive: false,
        above: Some((200.0, MessageTemplates::high_cholesterol)),
    },
    FamilyRule {
        kind: "wbc",
        keys: &["wbc", "white blood cells"],
        unit: "cells/μL",
        below: Some((4000.0, MessageTemplates::leukopenia)),
        below_inclusive: false,
        above: Some((11000.0, MessageTemplates::infection)),
    },
];

/// Evaluate extracted fields against the fixed thresholds.
///
/// Families are independent: a missing or unusable value yields no finding
/// for that family and never aborts the rest. Zero findings collapse to the
/// single synthetic general entry.
pub fn analyze_with_rules(fields: &StructuredFields) -> Vec<Finding> {
    let mut findings = Vec::new();

    for rule in SCALAR_RULES {
        let Some(value) = first_present(fields, rule.keys) else {
            continue;
        };
        if let Some((threshold, template)) = rule.below {
            let low = if rule.below_inclusive {
                value <= threshold
            } else {
                value < threshold
            };
            if low {
                findings.push(Finding::abnormal(rule.kind, value, rule.unit, template(value)));
                continue;
            }
        }
        if let Some((threshold, template)) = rule.above {
            if value > threshold {
                findings.push(Finding::abnormal(rule.kind, value, rule.unit, template(value)));
            }
        }
    }

    evaluate_blood_pressure(fields, &mut findings);

    if findings.is_empty() {
        findings.push(Finding::general(MessageTemplates::no_findings_rules()));
    }

    findings
}

/// Blood pressure needs both halves of the `SYS/DIA` pair, so it sits
/// outside the scalar table.
fn evaluate_blood_pressure(fields: &StructuredFields, findings: &mut Vec<Finding>) {
    let (Some(systolic), Some(diastolic)) = (
        fields.get("systolic").map(|m| m.value),
        fields.get("diastolic").map(|m| m.value),
    ) else {
        return;
    };

    if systolic > 140.0 || diastolic > 90.0 {
        findings.push(Finding::abnormal(
            "blood_pressure",
            systolic,
            "mmHg",
            MessageTemplates::hypertension(systolic, diastolic),
        ));
    } else if systolic < 90.0 || diastolic < 60.0 {
        findings.push(Finding::abnormal(
            "blood_pressure",
            systolic,
            "mmHg",
            MessageTemplates::hypotension(systolic, diastolic),
        ));
    }
}

fn first_present(fields: &StructuredFields, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| fields.get(*k).map(|m| m.value))
}
