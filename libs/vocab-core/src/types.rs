//! Core types shared by the grading, similarity and duplicate modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default percentage a pair must reach to land in a similar-duplicate group.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 85.0;

/// Default minimum blended score for the pairwise smart pass.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 80.0;

/// Default upper bound on collection size for the pairwise smart pass.
pub const DEFAULT_SMART_MAX_ITEMS: usize = 2000;

/// A vocabulary record owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    pub english: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl VocabularyItem {
    pub fn new(id: impl Into<String>, english: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            english: english.into(),
            created_at,
            meaning: None,
        }
    }
}

/// How confident a duplicate group is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceTier {
    Exact,
    HighConfidence,
    MediumConfidence,
    LowConfidence,
}

impl ConfidenceTier {
    /// Map a blended score in `[0, 100]` to a tier.
    pub fn from_score(score: f64) -> Self {
        if score >= 100.0 {
            Self::Exact
        } else if score >= 95.0 {
            Self::HighConfidence
        } else if score >= 85.0 {
            Self::MediumConfidence
        } else {
            Self::LowConfidence
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::HighConfidence => "high-confidence",
            Self::MediumConfidence => "medium-confidence",
            Self::LowConfidence => "low-confidence",
        }
    }
}

/// Two or more vocabulary items considered duplicates of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    /// Normalized text the group was formed around.
    pub key: String,
    pub items: Vec<VocabularyItem>,
    /// Similarity in `[0, 100]`.
    pub similarity: f64,
    pub confidence: ConfidenceTier,
    pub reasons: Vec<String>,
}

/// Summary numbers for a detection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateStats {
    pub total_items: usize,
    pub total_groups: usize,
    /// Items involved in exact groups.
    pub exact_duplicates: usize,
    /// Items involved in similar groups.
    pub similar_duplicates: usize,
    /// Records that could be collapsed if every group kept one item.
    pub potential_savings: usize,
}

/// Output of a detection run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub exact: Vec<DuplicateGroup>,
    pub similar: Vec<DuplicateGroup>,
    pub stats: DuplicateStats,
}

/// Input to a detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRequest {
    pub vocabularies: Vec<VocabularyItem>,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

impl DetectionRequest {
    pub fn new(vocabularies: Vec<VocabularyItem>) -> Self {
        Self {
            vocabularies,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

/// Options for the pairwise smart pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartOptions {
    pub min_confidence: f64,
    pub max_items: usize,
}

impl Default for SmartOptions {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_items: DEFAULT_SMART_MAX_ITEMS,
        }
    }
}
