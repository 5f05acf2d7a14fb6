//! Text normalization for OCR'd or typed report text.
//!
//! Produces the canonical form downstream extraction matches against:
//! ASCII-only, whitespace-collapsed, unit-standardized, lowercase.
//! Pure and total; `normalize(normalize(x)) == normalize(x)`.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n\t]+").unwrap());
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Unit spelling variants collapsed to one canonical form per family.
/// Applied case-insensitively BEFORE the final lowercasing step.
static UNIT_VARIANTS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"(?i)mg\s*/\s*dl").unwrap(), "mg/dL"),
        (Regex::new(r"(?i)mmol\s*/\s*l").unwrap(), "mmol/L"),
        (Regex::new(r"(?i)\bg\s*/\s*dl").unwrap(), "g/dL"),
        (Regex::new(r"(?i)cells\s*/\s*ul").unwrap(), "cells/uL"),
        (Regex::new(r"(?i)mm\s*hg").unwrap(), "mmHg"),
        (Regex::new(r"%\s*").unwrap(), "%"),
    ]
});

/// Clean raw report text into its canonical lowercase form.
pub fn normalize(raw: &str) -> String {
    let text = fold_to_ascii(raw);

    let text = WHITESPACE_BREAKS.replace_all(&text, " ");
    let text = MULTI_SPACE.replace_all(&text, " ");
    let mut text = text.trim().to_string();

    for (pattern, canonical) in UNIT_VARIANTS.iter() {
        text = pattern.replace_all(&text, *canonical).into_owned();
    }

    text.to_lowercase()
}

/// Best-effort transliteration of accented Latin forms, then drop whatever
/// remains non-ASCII. Lossy by design; extraction only needs ASCII digits
/// and unit tokens.
fn fold_to_ascii(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => out.push('a'),
            'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => out.push('A'),
            'é' | 'è' | 'ê' | 'ë' => out.push('e'),
            'É' | 'È' | 'Ê' | 'Ë' => out.push('E'),
            'í' | 'ì' | 'î' | 'ï' => out.push('i'),
            'Í' | 'Ì' | 'Î' | 'Ï' => out.push('I'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => out.push('o'),
            'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => out.push('O'),
            'ú' | 'ù' | 'û' | 'ü' => out.push('u'),
            'Ú' | 'Ù' | 'Û' | 'Ü' => out.push('U'),
            'ç' => out.push('c'),
            'Ç' => out.push('C'),
            'ñ' => out.push('n'),
            'Ñ' => out.push('N'),
            'ý' | 'ÿ' => out.push('y'),
            'µ' | 'μ' => out.push('u'),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'ß' => out.push_str("ss"),
            // Everything else non-ASCII is dropped.
            _ => {}
        }
    }
    out
}
