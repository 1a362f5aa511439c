//! Remote OCR client layer for buletin.
//!
//! The OCR engine is an external HTTP service consumed as a black box:
//! image bytes (or a URL) go in, a best-effort plain-text transcription
//! comes out. This crate provides:
//! - the [`TextRecognizer`] seam backends implement
//! - [`OcrSpaceClient`], a client for the OCR.space parse API

mod client;
mod error;

pub use client::{OcrEngineMode, OcrInput, OcrServiceConfig, OcrSpaceClient, TextRecognizer};
pub use error::OcrError;

/// Re-export for callers matching on [`OcrError::Api`] statuses.
pub use reqwest::StatusCode;

/// Result type for OCR client operations.
pub type Result<T> = std::result::Result<T, OcrError>;
