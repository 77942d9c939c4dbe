//! Middleware error taxonomy.
//!
//! Only failures produced by the middleware itself live here. Backend
//! errors are never caught or translated; whatever status and body the
//! wrapped service produces flows through the annotation/wrapping paths
//! unchanged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures raised by the middleware before or after the backend call.
#[derive(Debug, Error)]
pub enum CrossOriginError {
    /// Strict mode rejected the JSONP callback name.
    #[error("invalid JSONP callback name: {0:?}")]
    InvalidCallback(String),

    /// The backend response body failed while being aggregated.
    #[error("failed to read backend response body: {0}")]
    BodyRead(#[from] axum::Error),
}

impl CrossOriginError {
    /// Status code reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCallback(_) => StatusCode::BAD_REQUEST,
            Self::BodyRead(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for CrossOriginError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
