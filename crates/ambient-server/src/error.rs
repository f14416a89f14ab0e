//! API-boundary error type and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::response::ApiResponse;

/// Typed per-request failure, rendered as the JSON envelope with a fixed
/// status code. Cache failures never appear here; the store swallows them
/// and handlers just see a miss.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed required parameters
    #[error("{0}")]
    Validation(String),

    /// A required setting (e.g. the weather API key) is absent
    #[error("{0}")]
    Configuration(String),

    /// A collaborator API failed or returned something unusable
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) | Self::Upstream(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }
        (
            status,
            Json(ApiResponse::<serde_json::Value>::error(self.to_string())),
        )
            .into_response()
    }
}
