//! Measurement family definitions for field extraction.
//!
//! Adding a measurement is a data change: append a `FieldFamily` entry.
//! Patterns match against canonical normalized text (ASCII, lowercase,
//! collapsed whitespace, standardized units).

/// How a family's numeric payload appears in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyKind {
    /// A single numeric token with an optional trailing unit.
    Scalar,
    /// A paired `SYS/DIA` reading, split into two scalar output keys.
    Pressure {
        systolic_key: &'static str,
        diastolic_key: &'static str,
    },
}

/// One known measurement family: output key, text aliases, recognized units.
#[derive(Debug, Clone, Copy)]
pub struct FieldFamily {
    /// Key under which the measurement lands in `StructuredFields`.
    pub key: &'static str,
    /// Name and aliases searched in the cleaned text, first match wins.
    pub aliases: &'static [&'static str],
    /// Unit tokens accepted directly after the numeric value.
    pub units: &'static [&'static str],
    pub kind: FamilyKind,
}

pub const FIELD_FAMILIES: &[FieldFamily] = &[
    FieldFamily {
        key: "glucose",
        aliases: &["glucose", "blood sugar"],
        units: &["mg/dl", "mmol/l"],
        kind: FamilyKind::Scalar,
    },
    FieldFamily {
        key: "hemoglobin",
        aliases: &["hemoglobin", "hgb"],
        units: &["g/dl"],
        kind: FamilyKind::Scalar,
    },
    FieldFamily {
        key: "cholesterol",
        aliases: &["cholesterol"],
        units: &["mg/dl"],
        kind: FamilyKind::Scalar,
    },
    FieldFamily {
        key: "wbc",
        aliases: &["wbc", "white blood cells"],
        units: &["cells/ul", "/ul"],
        kind: FamilyKind::Scalar,
    },
    FieldFamily {
        key: "blood_pressure",
        aliases: &["blood pressure", "bp"],
        units: &["mmhg"],
        kind: FamilyKind::Pressure {
            systolic_key: "systolic",
            diastolic_key: "diastolic",
        },
    },
];
