//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using DetectionError.
pub type Result<T> = std::result::Result<T, DetectionError>;

/// Errors that can occur while detecting duplicates.
///
/// Grading and the similarity metrics are total functions; only the
/// clustering passes and the worker that hosts them can fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectionError {
    #[error("collection of {size} items exceeds the pairwise limit of {limit}")]
    CollectionTooLarge { size: usize, limit: usize },

    #[error("invalid threshold {value}: expected a value between 0 and 100")]
    InvalidThreshold { value: f64 },

    #[error("detection worker failed: {0}")]
    Worker(String),
}
