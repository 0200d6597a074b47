//! Token-order-insensitive fuzzy matching over canonical keys.

use strsim::normalized_damerau_levenshtein;

/// Similarity between two canonical keys on a 0–100 scale.
///
/// Tokens are sorted before scoring so word order never matters
/// ("cholesterol ldl" scores 100 against "ldl cholesterol"), and
/// Damerau–Levenshtein counts the common transposition typo as a single
/// edit ("chloesterol" still resolves to "cholesterol").
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = token_sort(a);
    let b = token_sort(b);
    normalized_damerau_levenshtein(&a, &b) * 100.0
}

fn token_sort(key: &str) -> String {
    let mut tokens: Vec<&str> = key.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Scan `candidates` in order and return the index of the highest-scoring
/// one, provided its score reaches `threshold`.
///
/// Ties keep the earliest candidate, so iteration order is the tie-break —
/// callers must pass a deterministically ordered pool.
pub fn best_match<'a, I>(query: &str, candidates: I, threshold: f64) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, f64)> = None;

    for (idx, candidate) in candidates.into_iter().enumerate() {
        let score = similarity(query, candidate);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((idx, score));
        }
    }

    best.filter(|&(_, score)| score >= threshold).map(|(idx, _)| idx)
}
