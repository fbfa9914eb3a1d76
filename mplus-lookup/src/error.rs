//! Error types for mplus-lookup
//!
//! Two tiers:
//! - [`LookupError`]: fatal failure of the character profile fetch. Aborts
//!   the whole assembly and carries the status code to report.
//! - Run-detail failures never become errors; they are reported as
//!   [`crate::services::run_detail::RunDetailOutcome::Unavailable`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Fatal lookup failure
#[derive(Debug, Error)]
pub enum LookupError {
    /// Upstream answered with a non-success status
    #[error("Error fetching data from upstream API: {body}")]
    Upstream { status: u16, body: String },

    /// Request never produced a response (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

impl LookupError {
    /// HTTP-style status code to report for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            LookupError::Upstream { status, .. } => *status,
            LookupError::Network(_) => 500,
            LookupError::Parse(_) => 502,
        }
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Character lookup failed; status taken from the lookup error
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Lookup(ref err) => (
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY),
                "UPSTREAM_ERROR",
                err.to_string(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg,
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
