//! Rule-based field extractors for Romanian identity cards.
//!
//! Each field has its own independent rule; the parser evaluates the whole
//! table and collects whatever matched. Rules never read each other's
//! results, so a garbled section of the card costs exactly the fields
//! printed there, and adding or removing a field is a one-line table change.

pub mod address;
pub mod cnp;
pub mod dates;
pub mod markers;
pub mod names;
pub mod patterns;
pub mod series;

pub use address::AddressRule;
pub use cnp::{CnpRule, extract_cnp, validate_cnp};
pub use dates::{IssueDateRule, extract_issue_date, parse_issue_date};
pub use markers::{MarkerSpanRule, between_markers};
pub use names::{FirstNameRule, LastNameRule, extract_first_name, extract_last_name};
pub use series::{IdSeriesRule, extract_id_series};

use crate::models::record::FieldKind;

/// A successful rule application.
#[derive(Debug, Clone)]
pub struct RuleMatch {
    /// Extracted, normalized value.
    pub value: String,

    /// Fixed confidence of the rule that produced the value (0.0 - 1.0).
    pub confidence: f32,

    /// Byte span of the value in the source text, when known.
    pub span: Option<(usize, usize)>,
}

impl RuleMatch {
    pub fn new(value: impl Into<String>, confidence: f32) -> Self {
        Self {
            value: value.into(),
            confidence,
            span: None,
        }
    }

    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.span = Some((start, end));
        self
    }
}

/// A single field extraction rule.
pub trait FieldRule: Send + Sync {
    /// The field this rule produces.
    fn field(&self) -> FieldKind;

    /// Apply the rule to the full OCR text. `None` means the field is
    /// omitted from the record; rules never return empty values.
    fn apply(&self, text: &str) -> Option<RuleMatch>;
}

/// The default rule table, one entry per card field.
pub fn default_rules() -> Vec<Box<dyn FieldRule>> {
    vec![
        Box::new(CnpRule),
        Box::new(LastNameRule),
        Box::new(FirstNameRule),
        Box::new(MarkerSpanRule::nationality()),
        Box::new(MarkerSpanRule::sex()),
        Box::new(MarkerSpanRule::place_of_birth()),
        Box::new(AddressRule),
        Box::new(IdSeriesRule),
        Box::new(MarkerSpanRule::issuing_authority()),
        Box::new(IssueDateRule),
    ]
}
