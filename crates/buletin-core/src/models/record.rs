//! Identity record models for extracted ID card fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The fields an identity card extraction can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    NationalIdNumber,
    LastName,
    FirstName,
    Nationality,
    Sex,
    PlaceOfBirth,
    Address,
    IdSeries,
    IssuingAuthority,
    IssueDate,
}

impl FieldKind {
    /// All extractable fields, in card layout order.
    pub const ALL: [FieldKind; 10] = [
        FieldKind::NationalIdNumber,
        FieldKind::LastName,
        FieldKind::FirstName,
        FieldKind::Nationality,
        FieldKind::Sex,
        FieldKind::PlaceOfBirth,
        FieldKind::Address,
        FieldKind::IdSeries,
        FieldKind::IssuingAuthority,
        FieldKind::IssueDate,
    ];

    /// Stable snake_case key used in serialized output and persistence rows.
    pub fn key(&self) -> &'static str {
        match self {
            FieldKind::NationalIdNumber => "national_id_number",
            FieldKind::LastName => "last_name",
            FieldKind::FirstName => "first_name",
            FieldKind::Nationality => "nationality",
            FieldKind::Sex => "sex",
            FieldKind::PlaceOfBirth => "place_of_birth",
            FieldKind::Address => "address",
            FieldKind::IdSeries => "id_series",
            FieldKind::IssuingAuthority => "issuing_authority",
            FieldKind::IssueDate => "issue_date",
        }
    }

    /// Human-readable label for review forms and text output.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::NationalIdNumber => "CNP",
            FieldKind::LastName => "Last name",
            FieldKind::FirstName => "First name",
            FieldKind::Nationality => "Nationality",
            FieldKind::Sex => "Sex",
            FieldKind::PlaceOfBirth => "Place of birth",
            FieldKind::Address => "Address",
            FieldKind::IdSeries => "ID series",
            FieldKind::IssuingAuthority => "Issuing authority",
            FieldKind::IssueDate => "Issue date",
        }
    }
}

/// Structured identity data extracted from one card.
///
/// Every field is optional: a field is set only when its extraction rule
/// matched, and omitted from serialized output otherwise. Values are
/// trimmed, and fields sourced from multi-line spans have their newlines
/// collapsed to single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Personal numeric code (13 digits).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Series code and document number, stored as `"XX 123456"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_series: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_authority: Option<String>,

    /// Issue date as printed on the card (`DD.MM.YY`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
}

impl IdentityRecord {
    /// Get a field value by kind.
    pub fn get(&self, field: FieldKind) -> Option<&str> {
        let slot = match field {
            FieldKind::NationalIdNumber => &self.national_id_number,
            FieldKind::LastName => &self.last_name,
            FieldKind::FirstName => &self.first_name,
            FieldKind::Nationality => &self.nationality,
            FieldKind::Sex => &self.sex,
            FieldKind::PlaceOfBirth => &self.place_of_birth,
            FieldKind::Address => &self.address,
            FieldKind::IdSeries => &self.id_series,
            FieldKind::IssuingAuthority => &self.issuing_authority,
            FieldKind::IssueDate => &self.issue_date,
        };
        slot.as_deref()
    }

    /// Set a field value by kind.
    pub fn set(&mut self, field: FieldKind, value: String) {
        let slot = match field {
            FieldKind::NationalIdNumber => &mut self.national_id_number,
            FieldKind::LastName => &mut self.last_name,
            FieldKind::FirstName => &mut self.first_name,
            FieldKind::Nationality => &mut self.nationality,
            FieldKind::Sex => &mut self.sex,
            FieldKind::PlaceOfBirth => &mut self.place_of_birth,
            FieldKind::Address => &mut self.address,
            FieldKind::IdSeries => &mut self.id_series,
            FieldKind::IssuingAuthority => &mut self.issuing_authority,
            FieldKind::IssueDate => &mut self.issue_date,
        };
        *slot = Some(value);
    }

    /// Present fields as `(kind, value)` pairs, in card layout order.
    ///
    /// This is the shape the persistence layer consumes: one row per
    /// extracted field.
    pub fn entries(&self) -> Vec<(FieldKind, &str)> {
        FieldKind::ALL
            .iter()
            .filter_map(|&field| self.get(field).map(|value| (field, value)))
            .collect()
    }

    /// True when no rule matched anything.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Number of extracted fields.
    pub fn len(&self) -> usize {
        self.entries().len()
    }
}

/// Metadata about the extraction process.
///
/// The structured replacement for per-field debug prints: tests and callers
/// can see exactly which rules fired without scraping console output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Overall extraction confidence (0.0 - 1.0).
    pub confidence: f32,

    /// OCR backend used, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_engine: Option<String>,

    /// Processing time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,

    /// Warnings or issues encountered during extraction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Fields whose rules did not match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,

    /// Field-level confidence scores, keyed by field key.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_confidence: HashMap<String, f32>,
}
