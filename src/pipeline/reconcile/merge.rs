//! Cross-source candidate deduplication.

use crate::pipeline::extraction::types::CandidateBiomarker;

use super::canonical::canonicalize;
use super::fuzzy::similarity;
use super::MERGE_DUPLICATE_THRESHOLD;

/// Merge two ordered candidate lists into one deduplicated list.
///
/// Primary (pattern-sourced) entries are kept verbatim in their original
/// order. Each secondary entry is appended only if no entry already in
/// the result shares its canonical key or scores at or above the
/// duplicate threshold against it. Result order is primary first, then
/// surviving secondary entries — later fuzzy stages tie-break toward
/// earlier entries, so this order is load-bearing.
pub fn merge_candidates(
    primary: Vec<CandidateBiomarker>,
    secondary: Vec<CandidateBiomarker>,
) -> Vec<CandidateBiomarker> {
    let mut merged = primary;
    let mut keys: Vec<String> = merged.iter().map(|c| canonicalize(&c.name)).collect();

    for candidate in secondary {
        let key = canonicalize(&candidate.name);
        let duplicate = keys
            .iter()
            .any(|existing| *existing == key || similarity(existing, &key) >= MERGE_DUPLICATE_THRESHOLD);

        if duplicate {
            tracing::debug!(name = %candidate.name, "dropping duplicate generative candidate");
            continue;
        }

        keys.push(key);
        merged.push(candidate);
    }

    merged
}
