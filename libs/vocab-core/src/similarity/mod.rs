//! String similarity metrics for vocabulary words.
//!
//! Every metric is a pure function over `&str` and never fails. Scores are
//! reported on a `[0, 100]` scale except where noted.

pub mod edit;
pub mod jaro;
pub mod ngram;
pub mod soundex;
pub mod variations;

pub use edit::{damerau_levenshtein_distance, damerau_similarity, levenshtein_distance, normalized_similarity};
pub use jaro::{jaro_similarity, jaro_winkler_distance};
pub use ngram::ngram_similarity;
pub use soundex::soundex;
pub use variations::{detect_variations, is_spelling_variation};

use crate::types::ConfidenceTier;
use serde::{Deserialize, Serialize};

const JARO_WINKLER_WEIGHT: f64 = 0.35;
const NGRAM_WEIGHT: f64 = 0.35;
const DAMERAU_WEIGHT: f64 = 0.25;
const SOUNDEX_WEIGHT: f64 = 0.05;
const SOUNDEX_BONUS: f64 = 20.0;

/// Weighted blend of all metrics, in `[0, 100]`.
///
/// Inputs are trimmed and case-folded. Equal inputs score 100; anything else
/// is `JW*100*0.35 + bigram*0.35 + damerau%*0.25 + soundex_bonus*0.05`.
pub fn advanced_similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a == b {
        return 100.0;
    }

    let jaro_winkler = jaro_winkler_distance(&a, &b) * 100.0;
    let bigram = ngram_similarity(&a, &b, 2);
    let damerau = damerau_similarity(&a, &b);
    let soundex_bonus = if soundex(&a) == soundex(&b) {
        SOUNDEX_BONUS
    } else {
        0.0
    };

    (jaro_winkler * JARO_WINKLER_WEIGHT
        + bigram * NGRAM_WEIGHT
        + damerau * DAMERAU_WEIGHT
        + soundex_bonus * SOUNDEX_WEIGHT)
        .clamp(0.0, 100.0)
}

/// Every metric for one pair, for inspection and admin tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityBreakdown {
    pub levenshtein_distance: usize,
    pub damerau_levenshtein_distance: usize,
    /// In `[0, 1]`.
    pub jaro_winkler: f64,
    pub ngram: f64,
    pub soundex_left: String,
    pub soundex_right: String,
    pub sounds_alike: bool,
    pub spelling_variation: bool,
    pub advanced: f64,
    pub confidence: ConfidenceTier,
}

/// Compute every metric for a pair.
pub fn similarity_breakdown(a: &str, b: &str) -> SimilarityBreakdown {
    let left = a.trim().to_lowercase();
    let right = b.trim().to_lowercase();

    let soundex_left = soundex(&left);
    let soundex_right = soundex(&right);
    let advanced = advanced_similarity(&left, &right);

    SimilarityBreakdown {
        levenshtein_distance: levenshtein_distance(&left, &right),
        damerau_levenshtein_distance: damerau_levenshtein_distance(&left, &right),
        jaro_winkler: jaro_winkler_distance(&left, &right),
        ngram: ngram_similarity(&left, &right, 2),
        sounds_alike: soundex_left == soundex_right,
        soundex_left,
        soundex_right,
        spelling_variation: is_spelling_variation(&left, &right),
        advanced,
        confidence: ConfidenceTier::from_score(advanced),
    }
}

/// A named metric scoring a pair on the `[0, 100]` scale.
pub trait SimilarityMetric: Send + Sync {
    /// Metric identifier.
    fn name(&self) -> &'static str;

    /// Score two strings; 100 means identical under this metric.
    fn score(&self, a: &str, b: &str) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl SimilarityMetric for Levenshtein {
    fn name(&self) -> &'static str {
        "levenshtein"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        normalized_similarity(a, b) * 100.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DamerauLevenshtein;

impl SimilarityMetric for DamerauLevenshtein {
    fn name(&self) -> &'static str {
        "damerau_levenshtein"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        damerau_similarity(a, b)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl SimilarityMetric for JaroWinkler {
    fn name(&self) -> &'static str {
        "jaro_winkler"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        jaro_winkler_distance(a, b) * 100.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NGram {
    pub n: usize,
}

impl Default for NGram {
    fn default() -> Self {
        Self { n: 2 }
    }
}

impl SimilarityMetric for NGram {
    fn name(&self) -> &'static str {
        "ngram"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        ngram_similarity(a, b, self.n)
    }
}

/// All-or-nothing: 100 when the Soundex codes agree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Soundex;

impl SimilarityMetric for Soundex {
    fn name(&self) -> &'static str {
        "soundex"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        if soundex(a) == soundex(b) {
            100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Advanced;

impl SimilarityMetric for Advanced {
    fn name(&self) -> &'static str {
        "advanced"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        advanced_similarity(a, b)
    }
}

/// Get metric by name.
pub fn get_metric(name: &str) -> Option<Box<dyn SimilarityMetric>> {
    match name {
        "levenshtein" => Some(Box::new(Levenshtein)),
        "damerau_levenshtein" => Some(Box::new(DamerauLevenshtein)),
        "jaro_winkler" => Some(Box::new(JaroWinkler)),
        "ngram" => Some(Box::new(NGram::default())),
        "soundex" => Some(Box::new(Soundex)),
        "advanced" => Some(Box::new(Advanced)),
        _ => None,
    }
}
