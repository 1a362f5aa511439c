//! CNP (Romanian personal numeric code) extraction and validation.

use super::patterns::CNP_PATTERN;
use super::{FieldRule, RuleMatch};
use crate::models::record::FieldKind;

/// CNP field rule: label-anchored, exactly 13 digits.
pub struct CnpRule;

impl FieldRule for CnpRule {
    fn field(&self) -> FieldKind {
        FieldKind::NationalIdNumber
    }

    fn apply(&self, text: &str) -> Option<RuleMatch> {
        let caps = CNP_PATTERN.captures(text)?;
        let digits = caps.get(1)?;
        Some(RuleMatch::new(digits.as_str(), 0.95).with_span(digits.start(), digits.end()))
    }
}

/// Extract the CNP from text.
pub fn extract_cnp(text: &str) -> Option<String> {
    CnpRule.apply(text).map(|m| m.value)
}

/// Validate a CNP using the control digit algorithm.
///
/// CNP format: 13 digits where the last digit is a checksum computed with
/// the weight key 2-7-9-1-4-6-3-5-8-2-7-9; a weighted-sum residue of 10
/// maps to control digit 1.
pub fn validate_cnp(cnp: &str) -> bool {
    let digits: Vec<u32> = cnp
        .chars()
        .filter(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .collect();

    if digits.len() != 13 {
        return false;
    }

    const WEIGHTS: [u32; 12] = [2, 7, 9, 1, 4, 6, 3, 5, 8, 2, 7, 9];
    let sum: u32 = digits
        .iter()
        .take(12)
        .zip(WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();

    let control = match sum % 11 {
        10 => 1,
        r => r,
    };

    control == digits[12]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cnp_with_colon() {
        assert_eq!(
            extract_cnp("CNP: 1234567890123"),
            Some("1234567890123".to_string())
        );
    }

    #[test]
    fn test_extract_cnp_without_separator() {
        assert_eq!(
            extract_cnp("CNP 1960101223450"),
            Some("1960101223450".to_string())
        );
    }

    #[test]
    fn test_extract_cnp_case_insensitive_label() {
        assert_eq!(
            extract_cnp("cnp:1960101223450"),
            Some("1960101223450".to_string())
        );
    }

    #[test]
    fn test_extract_cnp_missing_label() {
        assert_eq!(extract_cnp("1234567890123"), None);
    }

    #[test]
    fn test_extract_cnp_too_few_digits() {
        assert_eq!(extract_cnp("CNP: 123456789012"), None);
    }

    #[test]
    fn test_validate_cnp_valid() {
        assert!(validate_cnp("1960101223450"));
    }

    #[test]
    fn test_validate_cnp_invalid_control_digit() {
        assert!(!validate_cnp("1960101223451"));
        assert!(!validate_cnp("1234567890123"));
    }

    #[test]
    fn test_validate_cnp_wrong_length() {
        assert!(!validate_cnp("196010122345"));
        assert!(!validate_cnp("19601012234500"));
        assert!(!validate_cnp(""));
    }
}
