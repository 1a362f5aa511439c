//! Issue-date extraction.

use chrono::NaiveDate;

use super::patterns::ISSUE_DATE_PATTERN;
use super::{FieldRule, RuleMatch};
use crate::models::record::FieldKind;

/// Issue-date rule: the first `DD.MM.YY`-shaped run anywhere in the text.
///
/// Unlike every other rule this one is not label-anchored, so any earlier
/// date-shaped substring on the card (validity range, a birth date in a
/// garbled line) wins instead. The lower confidence reflects that.
pub struct IssueDateRule;

impl FieldRule for IssueDateRule {
    fn field(&self) -> FieldKind {
        FieldKind::IssueDate
    }

    fn apply(&self, text: &str) -> Option<RuleMatch> {
        let caps = ISSUE_DATE_PATTERN.captures(text)?;
        let date = caps.get(1)?;
        Some(RuleMatch::new(date.as_str(), 0.5).with_span(date.start(), date.end()))
    }
}

/// Extract the issue date (as printed, `DD.MM.YY`) from text.
pub fn extract_issue_date(text: &str) -> Option<String> {
    IssueDateRule.apply(text).map(|m| m.value)
}

/// Parse a `DD.MM.YY` value into a calendar date. Two-digit years pivot at
/// 50: 00-50 map to the 2000s, 51-99 to the 1900s.
pub fn parse_issue_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('.');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;

    let year = if year <= 50 { 2000 + year } else { 1900 + year };
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_issue_date() {
        assert_eq!(
            extract_issue_date("eliberat la 15.03.21"),
            Some("15.03.21".to_string())
        );
    }

    #[test]
    fn test_first_date_wins() {
        assert_eq!(
            extract_issue_date("01.01.19 pana la 15.03.21"),
            Some("01.01.19".to_string())
        );
    }

    #[test]
    fn test_matches_inside_longer_date() {
        // The loose heuristic also fires on the first 8 characters of a
        // DD.MM.YYYY date.
        assert_eq!(
            extract_issue_date("valid 15.01.2024"),
            Some("15.01.20".to_string())
        );
    }

    #[test]
    fn test_no_date_shaped_run() {
        assert_eq!(extract_issue_date("CNP 1960101223450"), None);
    }

    #[test]
    fn test_parse_issue_date_pivot() {
        assert_eq!(
            parse_issue_date("15.03.21"),
            NaiveDate::from_ymd_opt(2021, 3, 15)
        );
        assert_eq!(
            parse_issue_date("15.03.99"),
            NaiveDate::from_ymd_opt(1999, 3, 15)
        );
    }

    #[test]
    fn test_parse_issue_date_invalid_calendar_day() {
        assert_eq!(parse_issue_date("99.99.99"), None);
    }
}
