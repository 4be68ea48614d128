use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ContactError, ContactResult};

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern is valid"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email pattern is valid"));

/// Returns true if the trimmed phone is 7-15 digits with an optional leading '+'.
pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone.trim())
}

/// Returns true if the trimmed email has a local part, an '@', and a dotted domain.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> ContactResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(ContactError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Trims a phone and checks it. Blank input yields an empty string.
pub fn optional_phone(phone: &str) -> ContactResult<String> {
    let trimmed = phone.trim();
    if trimmed.is_empty() || validate_phone(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ContactError::InvalidPhone(trimmed.to_string()))
    }
}

/// Trims an email and checks it. Blank input yields an empty string.
pub fn optional_email(email: &str) -> ContactResult<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() || validate_email(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ContactError::InvalidEmail(trimmed.to_string()))
    }
}
