//! Configuration structures for the scan pipeline.

use std::path::Path;

use buletin_ocr::OcrServiceConfig;
use serde::{Deserialize, Serialize};

/// Main configuration for the buletin pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuletinConfig {
    /// Remote OCR service configuration.
    pub ocr: OcrServiceConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Check the CNP control digit and record a warning on mismatch.
    /// The extracted digits are kept either way.
    pub validate_cnp: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { validate_cnp: true }
    }
}

impl BuletinConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
