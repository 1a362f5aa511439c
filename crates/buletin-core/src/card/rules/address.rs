//! Address extraction.

use super::patterns::ADDRESS_PATTERN;
use super::{FieldRule, RuleMatch};
use crate::models::record::FieldKind;

/// Address rule: the run of address-looking text under the address label,
/// with newlines collapsed to single spaces.
pub struct AddressRule;

impl FieldRule for AddressRule {
    fn field(&self) -> FieldKind {
        FieldKind::Address
    }

    fn apply(&self, text: &str) -> Option<RuleMatch> {
        let caps = ADDRESS_PATTERN.captures(text)?;
        let body = caps.get(1)?;

        let value = body.as_str().replace('\n', " ").trim().to_string();
        if value.is_empty() {
            return None;
        }

        Some(RuleMatch::new(value, 0.85).with_span(body.start(), body.end()))
    }
}

/// Extract the address from text.
pub fn extract_address(text: &str) -> Option<String> {
    AddressRule.apply(text).map(|m| m.value)
}
