//! Surname and given-name extraction.
//!
//! Both fields sit on their own line directly under a trilingual label
//! line; the card prints them in uppercase, given names possibly
//! hyphenated.

use super::patterns::{FIRST_NAME_PATTERN, LAST_NAME_PATTERN};
use super::{FieldRule, RuleMatch};
use crate::models::record::FieldKind;

/// Surname rule: uppercase-only line after the name label.
pub struct LastNameRule;

impl FieldRule for LastNameRule {
    fn field(&self) -> FieldKind {
        FieldKind::LastName
    }

    fn apply(&self, text: &str) -> Option<RuleMatch> {
        let caps = LAST_NAME_PATTERN.captures(text)?;
        let name = caps.get(1)?;
        Some(RuleMatch::new(name.as_str(), 0.95).with_span(name.start(), name.end()))
    }
}

/// Given-name rule: uppercase letters and hyphens after the label.
pub struct FirstNameRule;

impl FieldRule for FirstNameRule {
    fn field(&self) -> FieldKind {
        FieldKind::FirstName
    }

    fn apply(&self, text: &str) -> Option<RuleMatch> {
        let caps = FIRST_NAME_PATTERN.captures(text)?;
        let name = caps.get(1)?;
        Some(RuleMatch::new(name.as_str(), 0.95).with_span(name.start(), name.end()))
    }
}

/// Extract the surname from text.
pub fn extract_last_name(text: &str) -> Option<String> {
    LastNameRule.apply(text).map(|m| m.value)
}

/// Extract the given name from text.
pub fn extract_first_name(text: &str) -> Option<String> {
    FirstNameRule.apply(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_last_name() {
        let text = "Nume/Nom/Last name\nPOPESCU\nPrenume/Prenom/First name\nION";
        assert_eq!(extract_last_name(text), Some("POPESCU".to_string()));
    }

    #[test]
    fn test_extract_first_name_hyphenated() {
        let text = "Prenume/Prenom/First name\nANA-MARIA";
        assert_eq!(extract_first_name(text), Some("ANA-MARIA".to_string()));
    }

    #[test]
    fn test_lowercase_value_line_does_not_match() {
        // The value class stays case-sensitive: only uppercase lines count.
        assert_eq!(extract_last_name("Nume/Nom/Last name\npopescu"), None);
    }

    #[test]
    fn test_case_insensitive_label() {
        let text = "NUME/NOM/LAST NAME\nPOPESCU";
        assert_eq!(extract_last_name(text), Some("POPESCU".to_string()));
    }

    #[test]
    fn test_missing_label() {
        assert_eq!(extract_last_name("POPESCU"), None);
        assert_eq!(extract_first_name("ANA-MARIA"), None);
    }
}
