//! Character n-gram overlap.

use std::collections::HashSet;

/// Collect the case-folded character n-grams of `s`.
///
/// A non-empty string shorter than `n` counts as a single gram.
fn ngrams(s: &str, n: usize) -> HashSet<String> {
    let chars: Vec<char> = s.to_lowercase().chars().collect();
    let n = n.max(1);

    if chars.is_empty() {
        return HashSet::new();
    }
    if chars.len() < n {
        return HashSet::from([chars.iter().collect()]);
    }

    chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// Jaccard similarity of the two strings' n-gram sets, in `[0, 100]`.
pub fn ngram_similarity(a: &str, b: &str, n: usize) -> f64 {
    let grams_a = ngrams(a, n);
    let grams_b = ngrams(b, n);

    if grams_a.is_empty() && grams_b.is_empty() {
        return 100.0;
    }

    let intersection = grams_a.intersection(&grams_b).count();
    let union = grams_a.union(&grams_b).count();

    intersection as f64 / union as f64 * 100.0
}
