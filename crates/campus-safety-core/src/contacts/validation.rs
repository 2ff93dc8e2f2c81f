use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Optional leading `+`, then digits, whitespace, and hyphens only.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s-]+$").expect("phone pattern is valid"));

/// Check a contact entry after trimming both fields.
///
/// Returns the trimmed `(name, phone)` on success.
pub fn validate_contact<'a>(
    name: &'a str,
    phone: &'a str,
) -> Result<(&'a str, &'a str), ValidationError> {
    let name = name.trim();
    let phone = phone.trim();

    if name.is_empty() || phone.is_empty() {
        return Err(ValidationError::MissingContactFields);
    }
    if !PHONE_PATTERN.is_match(phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok((name, phone))
}
