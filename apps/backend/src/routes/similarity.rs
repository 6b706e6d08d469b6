//! Similarity endpoints

use axum::Json;
use vocab_core::{detect_variations, get_metric, similarity_breakdown};

use crate::error::{ApiError, Result};
use crate::models::*;

/// POST /api/similarity/compare
pub async fn compare(Json(payload): Json<CompareRequest>) -> Json<SimilarityBreakdown> {
    Json(similarity_breakdown(&payload.left, &payload.right))
}

/// POST /api/similarity/score
pub async fn score(Json(payload): Json<ScoreRequest>) -> Result<Json<ScoreResponse>> {
    let metric = get_metric(&payload.metric)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown metric: {}", payload.metric)))?;

    Ok(Json(ScoreResponse {
        metric: metric.name().to_string(),
        score: metric.score(&payload.left, &payload.right),
    }))
}

/// POST /api/similarity/variations
pub async fn variations(Json(payload): Json<VariationsRequest>) -> Json<VariationsResponse> {
    Json(VariationsResponse {
        variations: detect_variations(&payload.word).into_iter().collect(),
    })
}
