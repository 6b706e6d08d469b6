//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use vocab_core::DetectionError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Detection(DetectionError::InvalidThreshold { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_threshold")
            }
            ApiError::Detection(DetectionError::CollectionTooLarge { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "collection_too_large")
            }
            ApiError::Detection(DetectionError::Worker(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "worker_error")
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
