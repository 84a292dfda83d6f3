//! Application error type mapping to HTTP status codes.
//!
//! Validation -> 400, Unauthorized -> 401, NotFound -> 404, everything else
//! -> 500 with a generic message body. The detailed cause is logged
//! server-side only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use parley_types::error::StoreError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Bad or missing input. The message is shown to the caller.
    Validation(String),
    /// No verifiable identity.
    Unauthorized(String),
    /// Lookup miss where existence was required.
    NotFound(String),
    /// Everything else. The detail stays server-side.
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AppError::NotFound("Session not found.".to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::Unauthorized(_) => {
                (StatusCode::UNAUTHORIZED, "User not authenticated.")
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.",
            ),
        };

        match &self {
            AppError::Internal(detail) => tracing::error!(%detail, "request failed"),
            AppError::Unauthorized(detail) => tracing::warn!(%detail, "unauthenticated request"),
            _ => tracing::debug!(error = ?self, "request rejected"),
        }

        (status, Json(ApiResponse::error(message))).into_response()
    }
}
