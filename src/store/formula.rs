//! Helpers for record ids and filter formulas.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::RushError;

static RECORD_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rec[A-Za-z0-9]{14}$").expect("record id regex is valid"));

/// Rejects anything that is not a store record id before it reaches a URL or formula.
pub fn validate_record_id(id: &str) -> Result<&str, RushError> {
    if RECORD_ID.is_match(id) {
        Ok(id)
    } else {
        Err(RushError::ValidationError(format!("invalid record id: {id}")))
    }
}

/// Quotes `value` as a formula string literal.
#[must_use]
pub fn string_literal(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// `{field}='value'`
#[must_use]
pub fn field_equals(field: &str, value: &str) -> String {
    format!("{{{field}}}={}", string_literal(value))
}
