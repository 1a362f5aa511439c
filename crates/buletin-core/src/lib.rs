//! Core library for Romanian identity card OCR processing.
//!
//! This crate provides:
//! - Rule-based field extraction from OCR transcriptions of Romanian
//!   national identity cards (CNP, names, nationality, address, ID series)
//! - Identity record and extraction report models
//! - A scan pipeline chaining a remote OCR backend and the extractor

pub mod card;
pub mod error;
pub mod models;
pub mod scan;

pub use card::{ExtractionResult, IdCardParser, RecordParser};
pub use error::{BuletinError, Result};
pub use models::config::{BuletinConfig, ExtractionConfig};
pub use models::record::{ExtractionMetadata, FieldKind, IdentityRecord};
pub use scan::{IdScanner, ScanOutcome};

/// Re-export OCR client types.
pub use buletin_ocr::{OcrError, OcrInput, OcrServiceConfig, OcrSpaceClient, TextRecognizer};
