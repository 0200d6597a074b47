//! Unit spelling normalization and same-quantity value conversion.

/// Known synonymous unit spellings, lowercase → canonical form.
const UNIT_SPELLINGS: &[(&str, &str)] = &[
    ("k/ul", "x10^9/L"),
    ("thou/ul", "x10^9/L"),
    ("x10e9/l", "x10^9/L"),
    ("m/ul", "x10^12/L"),
    ("mil/ul", "x10^12/L"),
    ("x10e12/l", "x10^12/L"),
    ("uiu/ml", "mIU/L"),
    ("iu/l", "U/L"),
    ("ug/dl", "mcg/dL"),
    ("meq/l", "mEq/L"),
];

/// Linear factors between unit spellings of the same physical quantity.
/// `value_in_from * factor = value_in_to`.
const CONVERSIONS: &[(&str, &str, f64)] = &[
    ("g/l", "g/dl", 0.1),
    ("g/dl", "g/l", 10.0),
    ("mg/l", "mg/dl", 0.1),
    ("mg/dl", "mg/l", 10.0),
    ("ng/ml", "ug/l", 1.0),
    ("ug/l", "ng/ml", 1.0),
];

/// Collapse a raw unit token to its canonical spelling.
///
/// Unknown units pass through unchanged — a mismatch is handled (or
/// tolerated) later in the pipeline, never rejected here.
pub fn normalize_unit(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    UNIT_SPELLINGS
        .iter()
        .find(|(from, _)| *from == lower)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| raw.trim().to_string())
}

/// Linear factor taking a value in `from` units to `to` units, when the
/// pair is a declared same-quantity conversion. Identical spellings
/// (case-insensitive) are factor 1.
pub fn conversion_factor(from: &str, to: &str) -> Option<f64> {
    let from = from.trim().to_lowercase();
    let to = to.trim().to_lowercase();
    if from == to {
        return Some(1.0);
    }
    CONVERSIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, factor)| *factor)
}

/// Convert `value` between units when the pair is declared convertible;
/// any unrecognized pair returns the value unchanged so unconvertible
/// units are never silently reinterpreted.
pub fn convert_value(value: f64, from: &str, to: &str) -> f64 {
    conversion_factor(from, to)
        .map(|factor| value * factor)
        .unwrap_or(value)
}
