//! Test fixtures and factory functions for creating test data.

use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};

use vocab_trainer_backend::models::VocabularyItem;

/// Create a vocabulary item created `age_days` before a fixed instant.
pub fn vocab(id: &str, english: &str, age_days: i64) -> VocabularyItem {
    let base = Utc.with_ymd_and_hms(2024, 6, 30, 8, 0, 0).unwrap();
    VocabularyItem::new(id, english, base - Duration::days(age_days))
}

/// Build a collection from words; ids are 1-based and later words are older.
pub fn collection(words: &[&str]) -> Vec<VocabularyItem> {
    words
        .iter()
        .enumerate()
        .map(|(i, w)| vocab(&(i + 1).to_string(), w, i as i64))
        .collect()
}

/// Body for the detect and jobs endpoints.
pub fn detect_request(words: &[&str], threshold: Option<f64>) -> Value {
    let mut body = json!({ "vocabularies": collection(words) });
    if let Some(threshold) = threshold {
        body["similarityThreshold"] = json!(threshold);
    }
    body
}

/// Body for the smart endpoint.
pub fn smart_request(words: &[&str], min_confidence: Option<f64>) -> Value {
    let mut body = json!({ "vocabularies": collection(words) });
    if let Some(min_confidence) = min_confidence {
        body["minConfidence"] = json!(min_confidence);
    }
    body
}

/// Ids of the items in a serialized duplicate group.
pub fn group_ids(group: &Value) -> Vec<String> {
    group["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}
