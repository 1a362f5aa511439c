//! Marker-delimited span extraction.
//!
//! The free-text fields on the card are bounded by the next printed label,
//! so the value is whatever sits strictly between two known marker strings.

use super::patterns::{
    ADDRESS_MARKER, BIRTHPLACE_MARKER, CITIZENSHIP_MARKER, DOCUMENT_TYPE_MARKER,
    NATIONALITY_START, SEX_MARKER, VALIDITY_MARKER,
};
use super::{FieldRule, RuleMatch};
use crate::models::record::FieldKind;

/// Slice of `text` strictly between `start` and the first occurrence of
/// `end` after it, with the byte span of the slice. `None` when either
/// marker is missing, which also covers an end marker that only appears
/// before the start marker.
pub fn between_markers<'a>(text: &'a str, start: &str, end: &str) -> Option<(&'a str, usize, usize)> {
    let start_idx = text.find(start)? + start.len();
    let end_idx = start_idx + text[start_idx..].find(end)?;
    Some((&text[start_idx..end_idx], start_idx, end_idx))
}

/// A field bounded by a start and an end marker.
pub struct MarkerSpanRule {
    field: FieldKind,
    start: &'static str,
    end: &'static str,
    collapse_newlines: bool,
}

impl MarkerSpanRule {
    /// Nationality: between the nationality label and the sex label.
    pub fn nationality() -> Self {
        Self {
            field: FieldKind::Nationality,
            start: NATIONALITY_START,
            end: SEX_MARKER,
            collapse_newlines: true,
        }
    }

    /// Sex: between the sex label and the citizenship token. Single-line
    /// value, so newlines are left alone and only the trim applies.
    pub fn sex() -> Self {
        Self {
            field: FieldKind::Sex,
            start: SEX_MARKER,
            end: CITIZENSHIP_MARKER,
            collapse_newlines: false,
        }
    }

    /// Place of birth: between the birthplace label and the address label.
    pub fn place_of_birth() -> Self {
        Self {
            field: FieldKind::PlaceOfBirth,
            start: BIRTHPLACE_MARKER,
            end: ADDRESS_MARKER,
            collapse_newlines: true,
        }
    }

    /// Issuing authority: between the validity label and the MRZ document
    /// type prefix at the bottom of the card.
    pub fn issuing_authority() -> Self {
        Self {
            field: FieldKind::IssuingAuthority,
            start: VALIDITY_MARKER,
            end: DOCUMENT_TYPE_MARKER,
            collapse_newlines: true,
        }
    }
}

impl FieldRule for MarkerSpanRule {
    fn field(&self) -> FieldKind {
        self.field
    }

    fn apply(&self, text: &str) -> Option<RuleMatch> {
        let (raw, start, end) = between_markers(text, self.start, self.end)?;

        let value = if self.collapse_newlines {
            raw.replace('\n', " ")
        } else {
            raw.to_string()
        };
        let value = value.trim().to_string();

        if value.is_empty() {
            return None;
        }

        Some(RuleMatch::new(value, 0.85).with_span(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_between_markers() {
        let (span, _, _) = between_markers("aaSTARTvalueENDbb", "START", "END").unwrap();
        assert_eq!(span, "value");
    }

    #[test]
    fn test_between_markers_missing_start() {
        assert!(between_markers("valueEND", "START", "END").is_none());
    }

    #[test]
    fn test_between_markers_missing_end() {
        assert!(between_markers("STARTvalue", "START", "END").is_none());
    }

    #[test]
    fn test_between_markers_end_before_start() {
        assert!(between_markers("ENDxxSTARTvalue", "START", "END").is_none());
    }

    #[test]
    fn test_nationality_between_labels() {
        let text = "Nationality\nROU\nSex/Sexe/Sex";
        let m = MarkerSpanRule::nationality().apply(text).unwrap();
        assert_eq!(m.value, "ROU");
    }

    #[test]
    fn test_multiline_span_is_collapsed() {
        let text = "Nationality\nROU\nRomana\nSex/Sexe/Sex";
        let m = MarkerSpanRule::nationality().apply(text).unwrap();
        assert_eq!(m.value, "ROU Romana");
    }

    #[test]
    fn test_sex_between_labels() {
        let text = "Sex/Sexe/Sex\nF\nCetatenie Romana";
        let m = MarkerSpanRule::sex().apply(text).unwrap();
        assert_eq!(m.value, "F");
    }

    #[test]
    fn test_no_sex_markers_means_no_match() {
        assert!(MarkerSpanRule::sex().apply("Nume/Nom/Last name\nPOP").is_none());
    }

    #[test]
    fn test_empty_span_is_omitted() {
        let text = "Nationality\nSex/Sexe/Sex";
        assert!(MarkerSpanRule::nationality().apply(text).is_none());
    }

    #[test]
    fn test_issuing_authority_span() {
        let text = "Valabilitate/Validite/Validity\nS.P.C.E.P. Sector 2\n15.03.21-15.03.2031\nIDROUPOPESCU<<ANA<<<";
        let m = MarkerSpanRule::issuing_authority().apply(text).unwrap();
        assert_eq!(m.value, "S.P.C.E.P. Sector 2 15.03.21-15.03.2031");
    }
}
