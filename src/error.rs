//! Error types for the posts proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Upstream Error Enum ==
/// Failures while fetching from the WordPress backend.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Backend answered with a non-success status
    #[error("WordPress API error: {0}")]
    Status(u16),

    /// Request could not be sent or the body could not be decoded.
    ///
    /// The message stays generic; the reqwest error is kept as the source.
    #[error("Failed to fetch posts")]
    Transport(#[from] reqwest::Error),
}

// == App Error Enum ==
/// Unified error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum AppError {
    /// No upstream URL was configured
    #[error("WordPress API URL not configured")]
    NotConfigured,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream fetch failed and nothing was cached to fall back on
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(UpstreamError::Status(code)) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Upstream(UpstreamError::Transport(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.to_string()));

        (self.status(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, AppError>;
