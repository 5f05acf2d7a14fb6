use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel unit recorded when no recognized unit token follows a value.
pub const UNIT_UNKNOWN: &str = "unknown";

/// One extracted lab measurement: numeric value plus unit string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    UNIT_UNKNOWN.to_string()
}

impl Measurement {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    pub fn without_unit(value: f64) -> Self {
        Self {
            value,
            unit: UNIT_UNKNOWN.to_string(),
        }
    }
}

/// Mapping from measurement name to its extracted value/unit.
///
/// Keys are present only when a pattern matched; absence of a key is not an
/// error. Serializes as `{"glucose": {"value": 180.0, "unit": "mg/dl"}}`.
pub type StructuredFields = BTreeMap<String, Measurement>;
