//! Validation errors for malformed codes and records.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed bit code '{input}': {reason}")]
    MalformedBits { input: String, reason: String },

    #[error("{field} must not be empty")]
    EmptyText { field: &'static str },

    #[error("code {code} already carries a sixth bit")]
    AlreadyExtended { code: String },
}

impl ValidationError {
    pub fn malformed_bits(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedBits {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn empty(field: &'static str) -> Self {
        Self::EmptyText { field }
    }
}

/// Reject blank text, returning the trimmed value.
pub fn require_text<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::empty(field))
    } else {
        Ok(trimmed)
    }
}
