//! Error types for the comparison storage layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Storage Error Enum ==
/// Failures reported by a durable key-value adapter.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The adapter's storage budget is exhausted
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    /// The adapter cannot be reached at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded for storage
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// Returns true for the recoverable quota condition.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StorageError::QuotaExceeded)
    }
}

// == Generator Error Enum ==
/// Failures from the remote format generator.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Transport failure talking to the generator
    #[error("Generator request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Generator answered with a non-success status
    #[error("Generator returned status {0}")]
    Status(u16),

    /// Generator produced nothing usable
    #[error("Generator returned no formats")]
    Empty,
}

// == App Error Enum ==
/// Error type surfaced by the HTTP layer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The external generator failed
    #[error("Generation failed: {0}")]
    Generator(#[from] GeneratorError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Generator(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, AppError>;
