//! String similarity used to match source headers to canonical fields.

use rapidfuzz::distance::levenshtein;

/// Score returned when one normalized name contains the other.
const CONTAINMENT_SCORE: f32 = 0.8;

/// Lowercase and drop whitespace and underscores.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Similarity of two header names in `[0, 1]`.
///
/// Exact match after normalization scores 1.0 and containment in either
/// direction scores 0.8. Everything else falls back to normalized
/// Levenshtein distance.
pub fn score(expected: &str, candidate: &str) -> f32 {
    let a = normalize(expected);
    let b = normalize(candidate);

    if a == b {
        return 1.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return CONTAINMENT_SCORE;
    }

    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    let distance = levenshtein::distance(a.chars(), b.chars());
    (1.0 - distance as f32 / longest as f32).clamp(0.0, 1.0)
}
