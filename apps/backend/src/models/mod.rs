//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from vocab-core
pub use vocab_core::types::{
    DetectionResult, DuplicateGroup, DuplicateStats, SmartOptions, VocabularyItem,
};
pub use vocab_core::{GradeResult, SimilarityBreakdown};

// === Grading ===

/// Request to grade a typed answer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerRequest {
    pub user_answer: String,
    pub template: String,
}

/// Request to list the literal answers a template accepts
#[derive(Debug, Deserialize)]
pub struct ExpandTemplateRequest {
    pub template: String,
}

#[derive(Debug, Serialize)]
pub struct ExpandTemplateResponse {
    pub candidates: Vec<String>,
}

// === Similarity ===

/// Pair of strings to compare
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub left: String,
    pub right: String,
}

/// Pair of strings scored by one named metric
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub left: String,
    pub right: String,
    pub metric: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub metric: String,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct VariationsRequest {
    pub word: String,
}

#[derive(Debug, Serialize)]
pub struct VariationsResponse {
    pub variations: Vec<String>,
}

// === Duplicates ===

/// Collection to scan; a missing threshold uses the configured default.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectRequest {
    pub vocabularies: Vec<VocabularyItem>,
    #[serde(default)]
    pub similarity_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartRequest {
    pub vocabularies: Vec<VocabularyItem>,
    #[serde(default)]
    pub min_confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SmartResponse {
    pub groups: Vec<DuplicateGroup>,
}

/// Acknowledgement for a queued detection job
#[derive(Debug, Serialize)]
pub struct JobAccepted {
    pub generation: u64,
}
