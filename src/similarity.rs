//! # Similarity Scorer
//!
//! Levenshtein edit distance and the normalized similarity derived from it.
//! Used by identifier resolution only; ingredient matching relies on
//! substring containment instead.

/// Character-level Levenshtein distance
///
/// Insertions, deletions and substitutions each cost 1.
///
/// ```rust
/// use recipe_engine::similarity::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("", "abc"), 3);
/// ```
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Similarity in `[0, 1]`: `1 - distance / max(|a|, |b|)`
///
/// Two empty strings are identical and score `1.0`.
///
/// ```rust
/// use recipe_engine::similarity::similarity;
///
/// assert_eq!(similarity("", ""), 1.0);
/// assert!((similarity("recpe-001", "recipe-001") - 0.9).abs() < 1e-9);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}
