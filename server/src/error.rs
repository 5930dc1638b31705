use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use audio_core::AudioError;
use gemini_core::GenerationError;

/// API Error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("A voice generation is already in progress")]
    Busy,

    #[error("{0}")]
    Generation(#[from] GenerationError),

    #[error("Voice service returned an unusable audio payload: {0}")]
    Audio(#[from] AudioError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Busy => (
                StatusCode::CONFLICT,
                "A voice generation is already in progress".to_string(),
            ),
            ApiError::Generation(e) => {
                tracing::error!("generation error: {e}");
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            ApiError::Audio(e) => {
                tracing::error!("unusable audio payload: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Voice service returned an unusable audio payload: {e}"),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
