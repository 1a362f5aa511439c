//! OCR.space-style recognition client.
//!
//! The service takes a multipart form (`apikey`, `OCREngine`, plus either a
//! `file` part or a `url` field) and answers with a JSON envelope carrying a
//! processing-error flag and zero or more parsed-text segments. Only the
//! first segment is surfaced; a flagged processing error yields an empty
//! transcription, not an error.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::Result;
use crate::error::OcrError;

/// Default parse endpoint of the OCR.space API.
pub const DEFAULT_ENDPOINT: &str = "https://api.ocr.space/parse/image";

/// Engine selector exposed by the service. Engine 2 favours accuracy over
/// speed and copes better with low-quality phone photos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OcrEngineMode {
    #[serde(rename = "1")]
    Fast,
    #[default]
    #[serde(rename = "2")]
    Accurate,
}

impl OcrEngineMode {
    /// Value of the `OCREngine` form field.
    pub fn as_param(&self) -> &'static str {
        match self {
            OcrEngineMode::Fast => "1",
            OcrEngineMode::Accurate => "2",
        }
    }
}

/// Configuration for the remote OCR service.
///
/// The API credential is an explicit configuration value; this crate never
/// reads it from or writes it to the process environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrServiceConfig {
    /// API key sent with every request.
    pub api_key: String,

    /// Parse endpoint URL.
    pub endpoint: String,

    /// Engine mode requested from the service.
    pub engine: OcrEngineMode,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Additional attempts the caller should allow on transient failures.
    pub max_retries: u32,
}

impl Default for OcrServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            engine: OcrEngineMode::default(),
            timeout_secs: 60,
            max_retries: 2,
        }
    }
}

/// Input to a text recognizer - raw bytes or a remote URL.
#[derive(Debug, Clone)]
pub enum OcrInput {
    /// An image or PDF loaded into memory.
    Bytes { filename: String, data: Vec<u8> },
    /// A URL the OCR service fetches itself.
    Url(String),
}

impl OcrInput {
    /// Short description for log lines.
    pub fn describe(&self) -> String {
        match self {
            OcrInput::Bytes { filename, data } => {
                format!("{} ({} bytes)", filename, data.len())
            }
            OcrInput::Url(url) => url.clone(),
        }
    }
}

/// Async seam implemented by text recognition backends.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Backend identifier recorded in extraction reports.
    fn name(&self) -> &str;

    /// Transcribe the input. Returns an empty string when the service
    /// processed the request but recognized nothing (or flagged a
    /// processing error); transport and protocol failures are `Err`.
    async fn recognize(&self, input: &OcrInput) -> Result<String>;
}

// ── OCR.space response envelope ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(rename = "ParsedResults", default)]
    parsed_results: Vec<ParsedResult>,

    #[serde(rename = "OCRExitCode", default)]
    ocr_exit_code: i32,

    #[serde(rename = "IsErroredOnProcessing", default)]
    is_errored_on_processing: bool,

    #[serde(rename = "ErrorMessage", default)]
    error_message: ErrorMessages,
}

#[derive(Debug, Deserialize)]
struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    parsed_text: String,

    #[serde(rename = "FileParseExitCode", default = "file_parse_exit_ok")]
    file_parse_exit_code: i32,
}

fn file_parse_exit_ok() -> i32 {
    1
}

/// The service reports errors as either a single string or a list.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum ErrorMessages {
    Many(Vec<String>),
    One(String),
    #[default]
    None,
}

impl ErrorMessages {
    fn first(&self) -> Option<&str> {
        match self {
            ErrorMessages::Many(messages) => messages.first().map(|s| s.as_str()),
            ErrorMessages::One(message) if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

// ── Client implementation ───────────────────────────────────────────────────

/// Client for the OCR.space parse API.
#[derive(Clone)]
pub struct OcrSpaceClient {
    client: reqwest::Client,
    config: OcrServiceConfig,
}

impl OcrSpaceClient {
    /// Build a client from explicit configuration.
    pub fn new(config: OcrServiceConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(OcrError::Config("missing OCR service API key".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn base_form(&self) -> Form {
        Form::new()
            .text("apikey", self.config.api_key.clone())
            .text("OCREngine", self.config.engine.as_param())
    }
}

#[async_trait]
impl TextRecognizer for OcrSpaceClient {
    fn name(&self) -> &str {
        "ocr_space"
    }

    async fn recognize(&self, input: &OcrInput) -> Result<String> {
        let form = match input {
            OcrInput::Bytes { filename, data } => {
                let part = Part::bytes(data.clone())
                    .file_name(filename.clone())
                    .mime_str(mime_for(filename))?;
                self.base_form().part("file", part)
            }
            OcrInput::Url(url) => self.base_form().text("url", url.clone()),
        };

        info!("requesting OCR for {}", input.describe());

        let resp = self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(OcrError::Api { status, body });
        }

        let raw = resp.text().await?;
        debug!("OCR response: {} bytes", raw.len());
        let parsed: ParseResponse = serde_json::from_str(&raw)?;

        if parsed.is_errored_on_processing {
            warn!(
                "OCR service reported a processing error (exit code {}): {}",
                parsed.ocr_exit_code,
                parsed.error_message.first().unwrap_or("no message")
            );
            return Ok(String::new());
        }

        if let Some(first) = parsed.parsed_results.first() {
            if first.file_parse_exit_code != 1 {
                warn!(
                    "OCR file parse exit code {} on first result",
                    first.file_parse_exit_code
                );
            }
        }

        Ok(parsed
            .parsed_results
            .into_iter()
            .next()
            .map(|r| r.parsed_text)
            .unwrap_or_default())
    }
}

/// Content type for the uploaded file part, from the file extension.
fn mime_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_success_envelope() {
        let json = r#"{
            "ParsedResults": [
                {"ParsedText": "CNP 1960101223450\n", "FileParseExitCode": 1, "ErrorMessage": "", "ErrorDetails": ""}
            ],
            "OCRExitCode": 1,
            "IsErroredOnProcessing": false,
            "ProcessingTimeInMilliseconds": "241"
        }"#;

        let parsed: ParseResponse = serde_json::from_str(json).unwrap();
        assert!(!parsed.is_errored_on_processing);
        assert_eq!(parsed.parsed_results.len(), 1);
        assert_eq!(parsed.parsed_results[0].parsed_text, "CNP 1960101223450\n");
    }

    #[test]
    fn test_parse_errored_envelope_with_message_list() {
        let json = r#"{
            "OCRExitCode": 99,
            "IsErroredOnProcessing": true,
            "ErrorMessage": ["Unable to recognize the file type", "E216"]
        }"#;

        let parsed: ParseResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.is_errored_on_processing);
        assert_eq!(
            parsed.error_message.first(),
            Some("Unable to recognize the file type")
        );
        assert!(parsed.parsed_results.is_empty());
    }

    #[test]
    fn test_parse_errored_envelope_with_single_message() {
        let json = r#"{"IsErroredOnProcessing": true, "ErrorMessage": "Invalid API key"}"#;

        let parsed: ParseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error_message.first(), Some("Invalid API key"));
    }

    #[test]
    fn test_empty_error_message_is_none() {
        let json = r#"{"IsErroredOnProcessing": false, "ErrorMessage": ""}"#;

        let parsed: ParseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error_message.first(), None);
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = OcrServiceConfig::default();
        assert!(matches!(
            OcrSpaceClient::new(config),
            Err(OcrError::Config(_))
        ));
    }

    #[test]
    fn test_engine_mode_param() {
        assert_eq!(OcrEngineMode::Fast.as_param(), "1");
        assert_eq!(OcrEngineMode::Accurate.as_param(), "2");
        assert_eq!(OcrEngineMode::default(), OcrEngineMode::Accurate);
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for("card.png"), "image/png");
        assert_eq!(mime_for("card.JPG"), "image/jpeg");
        assert_eq!(mime_for("scan.pdf"), "application/pdf");
        assert_eq!(mime_for("noextension"), "image/jpeg");
    }
}
