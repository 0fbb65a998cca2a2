//! Input checks shared by the signup and internship endpoints.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Returns the names of fields that are absent or blank after trimming,
/// in the order they were given.
pub fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| !matches!(value, Some(v) if !v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

/// Fails with [`CoreError::Validation`] listing every missing field.
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Result<(), CoreError> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Missing required fields: {}",
        missing.join(", ")
    )))
}

/// Syntactic email check (HTML5 rules, as implemented by `validator`).
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "email must be a valid email address".into(),
        ))
    }
}

/// Trim an optional text field, turning blank strings into `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
