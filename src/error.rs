//! Error types for the knowledge assistant

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for knowdesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide errors
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed caller input (empty query, bad message list)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Extraction requested for an unregistered file extension
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Format library failed to extract text
    #[error("Failed to extract '{filename}': {message}")]
    Extract { filename: String, message: String },

    /// Embedding provider call failed or returned a malformed shape
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Embedding or index failure inside a retrieval call
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// Vector index operation failed
    #[error("Vector index error: {0}")]
    Index(String),

    /// Completion provider failed or returned an empty answer
    #[error("Completion failed: {0}")]
    Completion(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an extraction error
    pub fn extract(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extract {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a retrieval error
    pub fn retrieval(message: impl Into<String>) -> Self {
        Self::Retrieval(message.into())
    }

    /// Create a vector index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }

    /// Create a completion error
    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            Error::UnsupportedFormat(ext) => (
                StatusCode::BAD_REQUEST,
                "unsupported_format",
                format!("Unsupported file type: {}", ext),
            ),
            Error::Extract { filename, message } => (
                StatusCode::BAD_REQUEST,
                "extract_error",
                format!("Failed to extract '{}': {}", filename, message),
            ),
            Error::Embedding(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "embedding_error", msg.clone())
            }
            Error::Retrieval(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "retrieval_error", msg.clone())
            }
            Error::Index(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "index_error", msg.clone())
            }
            Error::Completion(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "completion_error", msg.clone())
            }
            Error::Config(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", msg.clone())
            }
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
