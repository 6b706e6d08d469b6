//! Answer grading endpoints

use axum::Json;
use tracing::debug;
use vocab_core::{expand_template, grade_answer};

use crate::models::*;

/// POST /api/grading/check
pub async fn check(Json(payload): Json<CheckAnswerRequest>) -> Json<GradeResult> {
    let result = grade_answer(&payload.user_answer, &payload.template);
    debug!(
        correct = result.is_correct,
        candidates = result.candidates.len(),
        "graded answer"
    );
    Json(result)
}

/// POST /api/grading/expand
pub async fn expand(Json(payload): Json<ExpandTemplateRequest>) -> Json<ExpandTemplateResponse> {
    Json(ExpandTemplateResponse {
        candidates: expand_template(&payload.template),
    })
}
