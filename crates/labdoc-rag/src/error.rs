//! Error types for the RAG service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors surfaced by the RAG pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied data is malformed (empty text, zero top-k).
    /// Never retried.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An external backend (qdrant, embeddings, ollama) could not be
    /// reached or timed out.
    #[error("{service} unavailable: {message}")]
    Unavailable {
        /// Which backend failed (doubles as the failing pipeline stage)
        service: &'static str,
        /// Underlying transport error
        message: String,
    },

    /// The generation backend was reachable but returned an error status
    /// or a body that does not match the expected shape.
    #[error("generation failed: {0}")]
    Generation(String),

    /// Configuration error (bad address, dimensionality mismatch)
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected internal failure (malformed backend payloads etc.)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map a reqwest transport failure to `Unavailable` for the given backend.
    pub fn unavailable(service: &'static str, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        Error::Unavailable { service, message }
    }

    /// The pipeline stage this error originates from, for diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "input",
            Error::Unavailable { service, .. } => service,
            Error::Generation(_) => "generation",
            Error::Config(_) => "config",
            Error::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Error::Generation(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Short stage-tagged message, never a stack trace
        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "stage": self.stage(),
        }));

        (status, body).into_response()
    }
}

/// Convenience result type for RAG operations
pub type Result<T> = std::result::Result<T, Error>;
