//! ID series and document number extraction.

use super::patterns::ID_SERIES_PATTERN;
use super::{FieldRule, RuleMatch};
use crate::models::record::FieldKind;

/// Series rule: `SERIA <two letters> NR <digits>`, stored as
/// `"<series> <number>"`.
pub struct IdSeriesRule;

impl FieldRule for IdSeriesRule {
    fn field(&self) -> FieldKind {
        FieldKind::IdSeries
    }

    fn apply(&self, text: &str) -> Option<RuleMatch> {
        let caps = ID_SERIES_PATTERN.captures(text)?;
        let series = caps.get(1)?;
        let number = caps.get(2)?;
        let full = caps.get(0)?;

        Some(
            RuleMatch::new(format!("{} {}", series.as_str(), number.as_str()), 0.95)
                .with_span(full.start(), full.end()),
        )
    }
}

/// Extract the series and document number from text.
pub fn extract_id_series(text: &str) -> Option<String> {
    IdSeriesRule.apply(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_series() {
        assert_eq!(
            extract_id_series("SERIA RX NR 123456"),
            Some("RX 123456".to_string())
        );
    }

    #[test]
    fn test_label_tokens_are_case_insensitive() {
        assert_eq!(
            extract_id_series("Seria RX nr 123456"),
            Some("RX 123456".to_string())
        );
    }

    #[test]
    fn test_series_code_must_be_uppercase() {
        assert_eq!(extract_id_series("SERIA rx NR 123456"), None);
    }

    #[test]
    fn test_missing_number() {
        assert_eq!(extract_id_series("SERIA RX"), None);
    }
}
