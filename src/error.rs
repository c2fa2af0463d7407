//! Error types for the content cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the content cache.
///
/// A cache miss is never an error; these variants only describe failures
/// of the upstream fetch or of an incoming request.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Network failure talking to the upstream API
    #[error("HTTP error: {0}")]
    Http(String),

    /// Upstream API answered with a non-success status
    #[error("Upstream returned {status} for {path}")]
    Upstream { status: u16, path: String },

    /// Upstream body was not the JSON shape we expected
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A cache key held a payload of the wrong shape
    #[error("Unexpected payload under key: {0}")]
    PayloadMismatch(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad configuration (unparseable base URL, client build failure)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Upstream { status, .. } if *status == 404 => StatusCode::NOT_FOUND,
            CacheError::Http(_) | CacheError::Upstream { .. } | CacheError::Json(_) => {
                StatusCode::BAD_GATEWAY
            }
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::PayloadMismatch(_)
            | CacheError::Configuration(_)
            | CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the content cache.
pub type Result<T> = std::result::Result<T, CacheError>;
