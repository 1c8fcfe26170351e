//! Error types for the tool catalog.
//!
//! This module defines all error types using `thiserror` for ergonomic error handling.
//! Each variant maps onto a stable error code and HTTP status so the transport layer
//! can render a structured payload without inspecting messages.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Tool not found: {}", format_ids(.ids))]
    NotFound { ids: Vec<u64> },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Catalog file '{path}' is corrupt: {message}")]
    CorruptState { path: String, message: String },

    /// I/O failure while reading or flushing the backing file.
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

fn format_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl CatalogError {
    /// Create a not found error for a single id.
    pub fn not_found(id: u64) -> Self {
        Self::NotFound { ids: vec![id] }
    }

    /// Create a not found error naming every unresolved id.
    pub fn not_found_many(ids: Vec<u64>) -> Self {
        Self::NotFound { ids }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a corrupt state error for the given backing file.
    pub fn corrupt_state(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptState {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::CorruptState { .. } => "corrupt_state",
            Self::Storage { .. } => "storage_error",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// HTTP status equivalent of this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::CorruptState { .. } | Self::Storage { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => Some("List available tools with GET /api/tools"),
            Self::CorruptState { .. } => {
                Some("Restore the catalog file from a backup or fix the JSON by hand")
            }
            Self::Storage { .. } => Some("Check that the data directory exists and is writable"),
            _ => None,
        }
    }

    /// Ids that failed to resolve, empty for every other variant.
    pub fn missing_ids(&self) -> &[u64] {
        match self {
            Self::NotFound { ids } => ids,
            _ => &[],
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::storage(format!("I/O error: {}", err))
    }
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ids: Vec<u64>,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
                suggestion: self.suggestion(),
                ids: self.missing_ids().to_vec(),
            },
        };
        (status, Json(body)).into_response()
    }
}
