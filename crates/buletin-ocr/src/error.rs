//! Error types for the OCR client layer.

use thiserror::Error;

/// Errors that can occur while calling the remote OCR service.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("OCR service error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("invalid OCR response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Client configuration problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OcrError {
    /// True for failures worth retrying (network hiccups, 5xx responses).
    pub fn is_transient(&self) -> bool {
        match self {
            OcrError::Transport(_) => true,
            OcrError::Api { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
