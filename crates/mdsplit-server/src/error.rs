//! Error types for the HTTP server.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request payload is not a text document.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Request body could not be read as JSON.
    #[error("Malformed request: {0}")]
    Json(#[from] JsonRejection),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Listen address could not be parsed.
    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Json(rejection) => rejection.status(),
            Self::Io(_) | Self::Address(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }

        (status, axum::Json(json!({"error": self.to_string()}))).into_response()
    }
}
