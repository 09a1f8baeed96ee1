//! Required field validation
//!
//! Every request field the relay acts on must be present and non-empty.
//! Contents are otherwise opaque: usernames are claimed as given, and
//! public keys and ciphertext are never inspected.

/// Validation error for required fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredFieldError {
    /// Field was absent from the request
    Missing,
    /// Field was present but empty
    Empty,
}

/// Validate a required string field, returning the value on success
///
/// # Errors
///
/// Returns a `RequiredFieldError` variant describing the validation failure.
pub fn validate_required(value: Option<&str>) -> Result<&str, RequiredFieldError> {
    match value {
        None => Err(RequiredFieldError::Missing),
        Some("") => Err(RequiredFieldError::Empty),
        Some(value) => Ok(value),
    }
}
