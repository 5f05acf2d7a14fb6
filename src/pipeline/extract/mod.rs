//! Structured field extraction from canonical report text.
//!
//! Each known measurement family is searched independently: the family
//! name (or an alias) followed by the first numeric token within a short
//! lookahead window, optionally followed by a recognized unit. Only the
//! first match per family is kept. A family that fails to match or parse
//! is simply absent from the result; extraction itself never fails.

pub mod families;

use std::sync::LazyLock;

use regex::Regex;

use crate::models::fields::{Measurement, StructuredFields};
use families::{FamilyKind, FieldFamily, FIELD_FAMILIES};

/// Maximum non-digit characters between a family alias and its value.
const LOOKAHEAD_WINDOW: usize = 40;

struct CompiledFamily {
    family: &'static FieldFamily,
    pattern: Regex,
}

static COMPILED_FAMILIES: LazyLock<Vec<CompiledFamily>> = LazyLock::new(|| {
    FIELD_FAMILIES
        .iter()
        .filter_map(|family| {
            let pattern = Regex::new(&family_pattern(family)).ok()?;
            Some(CompiledFamily { family, pattern })
        })
        .collect()
});

fn family_pattern(family: &FieldFamily) -> String {
    let aliases = family
        .aliases
        .iter()
        .map(|a| regex::escape(a))
        .collect::<Vec<_>>()
        .join("|");
    let units = family
        .units
        .iter()
        .map(|u| regex::escape(u))
        .collect::<Vec<_>>()
        .join("|");

    match family.kind {
        FamilyKind::Scalar => format!(
            r"\b(?:{aliases})\b[^0-9]{{0,{LOOKAHEAD_WINDOW}}}?(\d+\.?\d*)\s*(?:({units}))?"
        ),
        FamilyKind::Pressure { .. } => format!(
            r"\b(?:{aliases})\b[^0-9]{{0,{LOOKAHEAD_WINDOW}}}?(\d{{2,3}})\s*/\s*(\d{{2,3}})\s*(?:({units}))?"
        ),
    }
}

/// Pattern-match cleaned text into named measurements.
pub fn extract(cleaned: &str) -> StructuredFields {
    let mut fields = StructuredFields::new();

    for compiled in COMPILED_FAMILIES.iter() {
        match compiled.family.kind {
            FamilyKind::Scalar => extract_scalar(compiled, cleaned, &mut fields),
            FamilyKind::Pressure {
                systolic_key,
                diastolic_key,
            } => extract_pressure(compiled, cleaned, systolic_key, diastolic_key, &mut fields),
        }
    }

    fields
}

fn extract_scalar(compiled: &CompiledFamily, cleaned: &str, fields: &mut StructuredFields) {
    let Some(caps) = compiled.pattern.captures(cleaned) else {
        return;
    };
    // An unparsable numeric token omits the family, never errors.
    let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) else {
        return;
    };
    let measurement = match caps.get(2) {
        Some(unit) => Measurement::new(value, unit.as_str()),
        None => Measurement::without_unit(value),
    };
    fields.insert(compiled.family.key.to_string(), measurement);
}

fn extract_pressure(
    compiled: &CompiledFamily,
    cleaned: &str,
    systolic_key: &str,
    diastolic_key: &str,
    fields: &mut StructuredFields,
) {
    let Some(caps) = compiled.pattern.captures(cleaned) else {
        return;
    };
    let systolic = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
    let diastolic = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
    let (Some(systolic), Some(diastolic)) = (systolic, diastolic) else {
        return;
    };
    let unit = caps
        .get(3)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "mmhg".to_string());
    fields.insert(systolic_key.to_string(), Measurement::new(systolic, unit.clone()));
    fields.insert(diastolic_key.to_string(), Measurement::new(diastolic, unit));
}
