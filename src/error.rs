//! Error types for the taller server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Transient failure reading or writing the backing store.
    /// Reads are retried a bounded number of times before this surfaces.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// An expected worksheet/tab does not exist. Never retried.
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// A row is missing expected columns or holds an unparseable value.
    #[error("Malformed row in worksheet '{worksheet}': {reason}")]
    MalformedRow { worksheet: String, reason: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "authentication", msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, "authorization", msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation", msg.clone()),
            AppError::StoreUnavailable(msg) => {
                tracing::warn!("Store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store_unavailable",
                    "The backing store is temporarily unavailable".to_string(),
                )
            }
            AppError::WorksheetNotFound(name) => {
                tracing::error!("Worksheet not found: {}", name);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "worksheet_not_found",
                    format!("Expected worksheet '{}' is missing", name),
                )
            }
            AppError::MalformedRow { worksheet, reason } => {
                tracing::error!("Malformed row in '{}': {}", worksheet, reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "malformed_row",
                    format!("Worksheet '{}' holds a malformed row", worksheet),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
