//! Error types for the buletin-core library.

use thiserror::Error;

/// Main error type for the buletin library.
#[derive(Error, Debug)]
pub enum BuletinError {
    /// OCR service error from the client layer.
    #[error("OCR error: {0}")]
    Ocr(#[from] buletin_ocr::OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the buletin library.
pub type Result<T> = std::result::Result<T, BuletinError>;
