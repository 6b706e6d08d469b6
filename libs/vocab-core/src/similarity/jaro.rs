//! Jaro and Jaro-Winkler similarity.

/// Jaro similarity in `[0, 1]`.
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    strsim::jaro(a, b)
}

/// Jaro-Winkler similarity in `[0, 1]`.
///
/// Boosts a Jaro score above 0.7 by 0.1 per shared leading character (up to
/// four), scaled by the distance left to a perfect score. Two empty strings
/// score 1, one empty string scores 0.
pub fn jaro_winkler_distance(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(a, b)
}
