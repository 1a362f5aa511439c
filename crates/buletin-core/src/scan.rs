//! Scan pipeline: remote OCR followed by field extraction.

use tracing::{info, warn};

use buletin_ocr::{OcrInput, TextRecognizer};

use crate::card::{IdCardParser, RecordParser};
use crate::error::Result;
use crate::models::record::{ExtractionMetadata, IdentityRecord};

/// Outcome of scanning one document image.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Raw transcription returned by the OCR service.
    pub raw_text: String,

    /// Extracted identity data.
    pub record: IdentityRecord,

    /// Extraction report.
    pub metadata: ExtractionMetadata,
}

/// Scans identity documents by chaining a remote OCR backend and the card
/// parser.
pub struct IdScanner<R> {
    recognizer: R,
    parser: IdCardParser,
    max_retries: u32,
}

impl<R: TextRecognizer> IdScanner<R> {
    /// Create a scanner with the default parser.
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            parser: IdCardParser::new(),
            max_retries: 2,
        }
    }

    /// Replace the default parser.
    pub fn with_parser(mut self, parser: IdCardParser) -> Self {
        self.parser = parser;
        self
    }

    /// Number of additional attempts after a transient OCR failure.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Recognize the input and extract an identity record from it.
    ///
    /// An empty transcription is not an error: the outcome carries an empty
    /// record for the caller (typically a review form) to handle.
    pub async fn scan(&self, input: &OcrInput) -> Result<ScanOutcome> {
        let raw_text = self.recognize_with_retry(input).await?;

        if raw_text.trim().is_empty() {
            info!("OCR returned no text; producing an empty record");
        }

        let result = self.parser.parse(&raw_text);
        let mut metadata = result.metadata;
        metadata.ocr_engine = Some(self.recognizer.name().to_string());

        Ok(ScanOutcome {
            raw_text,
            record: result.record,
            metadata,
        })
    }

    async fn recognize_with_retry(&self, input: &OcrInput) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.recognizer.recognize(input).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "transient OCR failure (attempt {}/{}): {}",
                        attempt, self.max_retries, e
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use buletin_ocr::OcrError;

    use super::*;

    /// Recognizer stub that fails transiently a set number of times before
    /// answering with fixed text.
    struct StubRecognizer {
        text: String,
        failures_left: Mutex<u32>,
    }

    impl StubRecognizer {
        fn new(text: &str, failures: u32) -> Self {
            Self {
                text: text.to_string(),
                failures_left: Mutex::new(failures),
            }
        }
    }

    #[async_trait]
    impl TextRecognizer for StubRecognizer {
        fn name(&self) -> &str {
            "stub"
        }

        async fn recognize(&self, _input: &OcrInput) -> buletin_ocr::Result<String> {
            let mut left = self.failures_left.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                return Err(OcrError::Api {
                    status: buletin_ocr::StatusCode::SERVICE_UNAVAILABLE,
                    body: "overloaded".to_string(),
                });
            }
            Ok(self.text.clone())
        }
    }

    fn bytes_input() -> OcrInput {
        OcrInput::Bytes {
            filename: "card.jpg".to_string(),
            data: vec![0u8; 4],
        }
    }

    #[tokio::test]
    async fn test_scan_extracts_record() {
        let scanner = IdScanner::new(StubRecognizer::new("CNP: 1960101223450", 0));
        let outcome = scanner.scan(&bytes_input()).await.unwrap();

        assert_eq!(
            outcome.record.national_id_number.as_deref(),
            Some("1960101223450")
        );
        assert_eq!(outcome.metadata.ocr_engine.as_deref(), Some("stub"));
        assert_eq!(outcome.raw_text, "CNP: 1960101223450");
    }

    #[tokio::test]
    async fn test_scan_retries_transient_failures() {
        let scanner =
            IdScanner::new(StubRecognizer::new("CNP: 1960101223450", 2)).with_max_retries(2);
        let outcome = scanner.scan(&bytes_input()).await.unwrap();
        assert!(!outcome.record.is_empty());
    }

    #[tokio::test]
    async fn test_scan_gives_up_after_max_retries() {
        let scanner =
            IdScanner::new(StubRecognizer::new("CNP: 1960101223450", 5)).with_max_retries(1);
        assert!(scanner.scan(&bytes_input()).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_transcription_is_not_an_error() {
        let scanner = IdScanner::new(StubRecognizer::new("", 0));
        let outcome = scanner.scan(&bytes_input()).await.unwrap();

        assert!(outcome.record.is_empty());
        assert!(outcome.raw_text.is_empty());
    }
}
