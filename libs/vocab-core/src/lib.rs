//! Core text toolkit shared by the vocabulary trainer services.
//!
//! Provides:
//! - Answer grading against compact answer templates
//! - String similarity metrics (Levenshtein, Damerau-Levenshtein,
//!   Jaro-Winkler, n-gram, Soundex) and spelling-variation detection
//! - Duplicate detection over vocabulary collections
//! - Shared types (VocabularyItem, DuplicateGroup, DetectionResult, etc.)

pub mod duplicates;
pub mod error;
pub mod grading;
pub mod similarity;
pub mod types;

pub use duplicates::{
    compute_stats, dedup_key, detect_duplicates, find_exact_duplicates, find_similar_duplicates,
    find_smart_duplicates, validate_threshold,
};
pub use error::{DetectionError, Result};
pub use grading::{check_answer, expand_template, grade_answer, normalize, GradeResult};
pub use similarity::{
    advanced_similarity, damerau_levenshtein_distance, detect_variations, get_metric,
    jaro_winkler_distance, levenshtein_distance, ngram_similarity, normalized_similarity,
    similarity_breakdown, soundex, SimilarityBreakdown, SimilarityMetric,
};
pub use types::{
    ConfidenceTier, DetectionRequest, DetectionResult, DuplicateGroup, DuplicateStats,
    SmartOptions, VocabularyItem,
};
