//! Identity card parser combining the independent field rules.

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::models::record::{ExtractionMetadata, FieldKind, IdentityRecord};

use super::RecordParser;
use super::rules::{FieldRule, default_rules, validate_cnp};

/// Result of one card extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted identity data.
    pub record: IdentityRecord,

    /// Report on what matched, what did not, and how confident each rule
    /// was.
    pub metadata: ExtractionMetadata,
}

/// Rule-table parser for Romanian identity cards.
///
/// Runs every rule independently over the raw OCR text; a field is present
/// in the record exactly when its rule matched. Pure and deterministic:
/// the same text always yields the same record.
pub struct IdCardParser {
    rules: Vec<Box<dyn FieldRule>>,
    validate_cnp: bool,
}

impl IdCardParser {
    /// Create a parser with the default rule table.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            validate_cnp: true,
        }
    }

    /// Set whether to check the CNP control digit. A mismatch only records
    /// a warning; the extracted digits are kept either way.
    pub fn with_cnp_validation(mut self, validate: bool) -> Self {
        self.validate_cnp = validate;
        self
    }
}

impl Default for IdCardParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser for IdCardParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut record = IdentityRecord::default();
        let mut metadata = ExtractionMetadata::default();

        debug!("parsing identity card from {} characters of text", text.len());

        for rule in &self.rules {
            let field = rule.field();
            match rule.apply(text) {
                Some(m) => {
                    debug!(
                        "rule matched: {} = {:?} (confidence {:.2})",
                        field.key(),
                        m.value,
                        m.confidence
                    );
                    metadata
                        .field_confidence
                        .insert(field.key().to_string(), m.confidence);
                    record.set(field, m.value);
                }
                None => {
                    debug!("rule missed: {}", field.key());
                    metadata.missing_fields.push(field.key().to_string());
                }
            }
        }

        if self.validate_cnp {
            if let Some(cnp) = record.get(FieldKind::NationalIdNumber) {
                if !validate_cnp(cnp) {
                    metadata
                        .warnings
                        .push(format!("CNP control digit mismatch: {}", cnp));
                }
            }
        }

        metadata.confidence = overall_confidence(&metadata.field_confidence);
        metadata.processing_time_ms = Some(start.elapsed().as_millis() as u64);

        debug!(
            "extracted {} of {} fields with confidence {:.2}",
            record.len(),
            FieldKind::ALL.len(),
            metadata.confidence
        );

        ExtractionResult { record, metadata }
    }
}

/// Mean of the per-field confidences; 0.0 when nothing matched.
fn overall_confidence(field_confidence: &HashMap<String, f32>) -> f32 {
    if field_confidence.is_empty() {
        return 0.0;
    }
    field_confidence.values().sum::<f32>() / field_confidence.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // OCR dump of a card with every section readable, in the column order
    // the recognition service emits them.
    const FULL_CARD: &str = "\
ROUMANIE ROMANIA ROMANIA
CARTE DE IDENTITATE CARTE D'IDENTITE IDENTITY CARD
SERIA RX NR 123456
CNP 1960101223450
Nume/Nom/Last name
POPESCU
Prenume/Prenom/First name
ANA-MARIA
Cetatenie/Nationalite/Nationality
ROU
Sex/Sexe/Sex
F
Cetatenie Romana
Emisa de/Delivree par/Issued by
Valabilitate/Validite/Validity
S.P.C.E.P. Sector 2
15.03.21-15.03.2031
IDROUPOPESCU<<ANA<MARIA<<<<<<<
Loc nastere/Lieu de naissance/Place of birth
Jud.CJ Mun.Dej
Domiciliu/Adresse/Address
Mun.Bucuresti Sec.2
Str.Aviatorilor nr.10 (bl.2, ap.3)
";

    #[test]
    fn test_parse_full_card() {
        let parser = IdCardParser::new();
        let result = parser.parse(FULL_CARD);
        let record = &result.record;

        assert_eq!(record.national_id_number.as_deref(), Some("1960101223450"));
        assert_eq!(record.last_name.as_deref(), Some("POPESCU"));
        assert_eq!(record.first_name.as_deref(), Some("ANA-MARIA"));
        assert_eq!(record.nationality.as_deref(), Some("ROU"));
        assert_eq!(record.sex.as_deref(), Some("F"));
        assert_eq!(record.place_of_birth.as_deref(), Some("Jud.CJ Mun.Dej"));
        assert_eq!(
            record.address.as_deref(),
            Some("Mun.Bucuresti Sec.2 Str.Aviatorilor nr.10 (bl.2, ap.3)")
        );
        assert_eq!(record.id_series.as_deref(), Some("RX 123456"));
        assert_eq!(
            record.issuing_authority.as_deref(),
            Some("S.P.C.E.P. Sector 2 15.03.21-15.03.2031")
        );
        assert_eq!(record.issue_date.as_deref(), Some("15.03.21"));

        assert!(result.metadata.missing_fields.is_empty());
        assert!(result.metadata.warnings.is_empty());
        assert!(result.metadata.confidence > 0.8);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let parser = IdCardParser::new();
        assert_eq!(parser.parse(FULL_CARD).record, parser.parse(FULL_CARD).record);
    }

    #[test]
    fn test_no_newlines_in_multiline_fields() {
        let result = IdCardParser::new().parse(FULL_CARD);
        for (_, value) in result.record.entries() {
            assert!(!value.contains('\n'), "embedded newline in {:?}", value);
            assert_eq!(value, value.trim());
        }
    }

    #[test]
    fn test_empty_input_yields_empty_record() {
        let result = IdCardParser::new().parse("");

        assert!(result.record.is_empty());
        assert_eq!(result.metadata.missing_fields.len(), FieldKind::ALL.len());
        assert!(result.metadata.field_confidence.is_empty());
        assert_eq!(result.metadata.confidence, 0.0);
    }

    #[test]
    fn test_garbage_input_yields_empty_record() {
        let result = IdCardParser::new().parse("qwerty 42 %%% \n\n###");
        assert!(result.record.is_empty());
    }

    #[test]
    fn test_partial_card_omits_missing_fields() {
        let result = IdCardParser::new().parse("CNP: 1960101223450\nsome noise");

        assert_eq!(
            result.record.national_id_number.as_deref(),
            Some("1960101223450")
        );
        assert!(result.record.sex.is_none());
        assert!(result.record.nationality.is_none());
        assert!(
            result
                .metadata
                .missing_fields
                .contains(&"sex".to_string())
        );
    }

    #[test]
    fn test_report_records_fired_rules() {
        let result = IdCardParser::new().parse("CNP: 1960101223450");

        assert!(
            result
                .metadata
                .field_confidence
                .contains_key("national_id_number")
        );
        assert!(!result.metadata.field_confidence.contains_key("last_name"));
    }

    #[test]
    fn test_cnp_checksum_mismatch_is_reported_not_dropped() {
        let result = IdCardParser::new().parse("CNP: 1234567890123");

        assert_eq!(
            result.record.national_id_number.as_deref(),
            Some("1234567890123")
        );
        assert_eq!(result.metadata.warnings.len(), 1);
        assert!(result.metadata.warnings[0].contains("control digit"));
    }

    #[test]
    fn test_cnp_validation_can_be_disabled() {
        let parser = IdCardParser::new().with_cnp_validation(false);
        let result = parser.parse("CNP: 1234567890123");
        assert!(result.metadata.warnings.is_empty());
    }
}
