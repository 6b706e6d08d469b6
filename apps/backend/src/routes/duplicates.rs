//! Duplicate detection endpoints

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use vocab_core::{validate_threshold, DetectionRequest};

use crate::error::Result;
use crate::models::*;
use crate::services::detection::DetectionStatus;
use crate::AppState;

fn detection_request(state: &AppState, payload: DetectRequest) -> Result<DetectionRequest> {
    let threshold = validate_threshold(
        payload
            .similarity_threshold
            .unwrap_or(state.config.similarity_threshold),
    )?;
    Ok(DetectionRequest::new(payload.vocabularies).with_threshold(threshold))
}

/// POST /api/duplicates/detect
pub async fn detect(
    State(state): State<AppState>,
    Json(payload): Json<DetectRequest>,
) -> Result<Json<DetectionResult>> {
    let request = detection_request(&state, payload)?;
    let result = state.runner.run_now(request).await?;
    Ok(Json(result))
}

/// POST /api/duplicates/smart
pub async fn smart(
    State(state): State<AppState>,
    Json(payload): Json<SmartRequest>,
) -> Result<Json<SmartResponse>> {
    let options = SmartOptions {
        min_confidence: payload
            .min_confidence
            .unwrap_or(state.config.smart.min_confidence),
        ..state.config.smart
    };

    let groups = state.runner.run_smart(payload.vocabularies, options).await?;
    info!(groups = groups.len(), "smart detection finished");

    Ok(Json(SmartResponse { groups }))
}

/// POST /api/duplicates/jobs
pub async fn submit_job(
    State(state): State<AppState>,
    Json(payload): Json<DetectRequest>,
) -> Result<(StatusCode, Json<JobAccepted>)> {
    let request = detection_request(&state, payload)?;
    let generation = state.runner.submit(request);
    Ok((StatusCode::ACCEPTED, Json(JobAccepted { generation })))
}

/// GET /api/duplicates/status
pub async fn status(State(state): State<AppState>) -> Json<DetectionStatus> {
    Json(state.runner.status())
}
