//! Duplicate detection over a vocabulary collection.
//!
//! Three passes are available:
//! - exact: items whose normalized text is identical
//! - similar: Levenshtein-based, only comparing items of similar length
//! - smart: every pair through [`advanced_similarity`]; O(n²), so callers
//!   must keep it to admin tooling and bounded collections

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::{DetectionError, Result};
use crate::similarity::{advanced_similarity, detect_variations, normalized_similarity, soundex};
use crate::types::{
    ConfidenceTier, DetectionRequest, DetectionResult, DuplicateGroup, DuplicateStats,
    SmartOptions, VocabularyItem,
};

/// The similar pass only compares items whose length differs by at most
/// this share of the shorter item's length, as a fraction `NUM / DEN`.
const LENGTH_TOLERANCE_NUM: usize = 3;
const LENGTH_TOLERANCE_DEN: usize = 10;

/// Key used to group items: lower-cased, punctuation removed, whitespace collapsed.
pub fn dedup_key(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the exact and similar passes and compute stats.
///
/// An empty collection yields a zero-valued result.
pub fn detect_duplicates(request: &DetectionRequest) -> Result<DetectionResult> {
    let items = &request.vocabularies;
    if items.is_empty() {
        return Ok(DetectionResult::default());
    }

    let threshold = validate_threshold(request.similarity_threshold)?;

    let exact = find_exact_duplicates(items);
    let similar = find_similar_duplicates(items, threshold);
    let stats = compute_stats(items.len(), &exact, &similar);

    debug!(
        total_items = stats.total_items,
        exact_groups = exact.len(),
        similar_groups = similar.len(),
        threshold,
        "duplicate detection finished"
    );

    Ok(DetectionResult {
        exact,
        similar,
        stats,
    })
}

/// Group items sharing the same [`dedup_key`].
pub fn find_exact_duplicates(items: &[VocabularyItem]) -> Vec<DuplicateGroup> {
    let mut by_key: BTreeMap<String, Vec<VocabularyItem>> = BTreeMap::new();

    for item in items {
        let key = dedup_key(&item.english);
        if key.is_empty() {
            continue;
        }
        by_key.entry(key).or_default().push(item.clone());
    }

    by_key
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(key, mut members)| {
            sort_newest_first(&mut members);
            DuplicateGroup {
                key,
                items: members,
                similarity: 100.0,
                confidence: ConfidenceTier::Exact,
                reasons: vec!["Exact match".to_string()],
            }
        })
        .collect()
}

/// Group items whose Levenshtein similarity is at least `threshold` percent
/// but below 100 (identical text belongs to the exact pass).
pub fn find_similar_duplicates(items: &[VocabularyItem], threshold: f64) -> Vec<DuplicateGroup> {
    similar_pass_with(items, threshold, |a, b| normalized_similarity(a, b) * 100.0)
}

fn similar_pass_with<F>(items: &[VocabularyItem], threshold: f64, mut compare: F) -> Vec<DuplicateGroup>
where
    F: FnMut(&str, &str) -> f64,
{
    let mut keyed: Vec<(String, usize, &VocabularyItem)> = items
        .iter()
        .map(|item| {
            let key = dedup_key(&item.english);
            let len = key.chars().count();
            (key, len, item)
        })
        .filter(|(key, _, _)| !key.is_empty())
        .collect();
    keyed.sort_by_key(|(_, len, _)| *len);

    let mut processed = vec![false; keyed.len()];
    let mut groups = Vec::new();

    for i in 0..keyed.len() {
        if processed[i] {
            continue;
        }

        let (anchor_key, anchor_len, anchor) = &keyed[i];
        let mut matched = Vec::new();
        let mut lowest = 100.0_f64;

        for j in (i + 1)..keyed.len() {
            let (other_key, other_len, _) = &keyed[j];
            // Sorted by length, so every later item is at least as long.
            if (other_len - anchor_len) * LENGTH_TOLERANCE_DEN > anchor_len * LENGTH_TOLERANCE_NUM {
                break;
            }
            if processed[j] {
                continue;
            }

            let score = compare(anchor_key, other_key);
            if score >= threshold && score < 100.0 {
                matched.push(j);
                lowest = lowest.min(score);
            }
        }

        if matched.is_empty() {
            continue;
        }

        processed[i] = true;
        let mut members = vec![(*anchor).clone()];
        for j in matched {
            processed[j] = true;
            members.push(keyed[j].2.clone());
        }
        sort_newest_first(&mut members);

        groups.push(DuplicateGroup {
            key: anchor_key.clone(),
            items: members,
            similarity: lowest,
            confidence: ConfidenceTier::from_score(lowest),
            reasons: vec!["Similar spelling".to_string()],
        });
    }

    groups
}

/// Compare every pair with [`advanced_similarity`] and emit a group per pair
/// scoring at least `options.min_confidence`. Shared Soundex codes and
/// British/American spelling variations are reported as extra reasons.
///
/// Fails with [`DetectionError::CollectionTooLarge`] above `options.max_items`
/// rather than silently sampling.
pub fn find_smart_duplicates(
    items: &[VocabularyItem],
    options: &SmartOptions,
) -> Result<Vec<DuplicateGroup>> {
    let min_confidence = validate_threshold(options.min_confidence)?;

    if items.len() > options.max_items {
        return Err(DetectionError::CollectionTooLarge {
            size: items.len(),
            limit: options.max_items,
        });
    }

    let prepared: Vec<Prepared<'_>> = items
        .iter()
        .map(|item| {
            let key = dedup_key(&item.english);
            Prepared {
                soundex: soundex(&key),
                variations: detect_variations(&key),
                key,
                item,
            }
        })
        .filter(|p| !p.key.is_empty())
        .collect();

    let mut groups = Vec::new();

    for (i, left) in prepared.iter().enumerate() {
        for right in &prepared[i + 1..] {
            let score = advanced_similarity(&left.key, &right.key);
            if score < min_confidence {
                continue;
            }
            let variation = !left.variations.is_disjoint(&right.variations);

            let confidence = ConfidenceTier::from_score(score);
            let mut reasons = vec![match confidence {
                ConfidenceTier::Exact => "Exact match",
                ConfidenceTier::HighConfidence => "Very high similarity",
                ConfidenceTier::MediumConfidence => "High similarity",
                ConfidenceTier::LowConfidence => "Moderate similarity",
            }
            .to_string()];
            if confidence != ConfidenceTier::Exact {
                if left.soundex == right.soundex {
                    reasons.push("Sounds similar".to_string());
                }
                if variation {
                    reasons.push("Common spelling variation".to_string());
                }
            }

            let mut members = vec![left.item.clone(), right.item.clone()];
            sort_newest_first(&mut members);

            groups.push(DuplicateGroup {
                key: left.key.clone(),
                items: members,
                similarity: score,
                confidence,
                reasons,
            });
        }
    }

    groups.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    debug!(
        items = prepared.len(),
        groups = groups.len(),
        min_confidence,
        "smart duplicate pass finished"
    );

    Ok(groups)
}

struct Prepared<'a> {
    key: String,
    soundex: String,
    variations: BTreeSet<String>,
    item: &'a VocabularyItem,
}

/// Summarize the two passes.
///
/// An item may sit in an exact group and a similar group at once; both
/// counts include it.
pub fn compute_stats(
    total_items: usize,
    exact: &[DuplicateGroup],
    similar: &[DuplicateGroup],
) -> DuplicateStats {
    let exact_duplicates: usize = exact.iter().map(|g| g.items.len()).sum();
    let similar_duplicates: usize = similar.iter().map(|g| g.items.len()).sum();
    let total_groups = exact.len() + similar.len();

    DuplicateStats {
        total_items,
        total_groups,
        exact_duplicates,
        similar_duplicates,
        potential_savings: (exact_duplicates + similar_duplicates).saturating_sub(total_groups),
    }
}

/// Accept a percentage threshold in `[0, 100]`.
pub fn validate_threshold(value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(DetectionError::InvalidThreshold { value })
    }
}

fn sort_newest_first(items: &mut [VocabularyItem]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
