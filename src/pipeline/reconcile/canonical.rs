//! Name canonicalization for biomarker comparison keys.

/// Collapse a free-text biomarker name into a comparison key.
///
/// Lowercases, replaces punctuation and whitespace runs with a single
/// space, and trims, so cosmetic variants ("Hb", "HGB:", "hemoglobin ")
/// compare equal downstream. Total and idempotent; garbage input yields
/// the empty string, never an error.
pub fn canonicalize(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut pending_space = false;

    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !key.is_empty() {
                key.push(' ');
            }
            pending_space = false;
            key.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    key
}
