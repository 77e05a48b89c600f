//! Core error types.

use crate::form::FormField;

/// Errors produced by the pure domain layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// One or more required form fields are missing or malformed.
    ///
    /// Carries every offending field so the caller can highlight all of them
    /// at once instead of failing one field at a time.
    #[error("missing required fields: {}", FormField::join(.missing))]
    Validation { missing: Vec<FormField> },

    /// An input value was structurally invalid (bad URL, bad date, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_every_missing_field() {
        let err = CoreError::Validation {
            missing: vec![FormField::Name, FormField::Colony],
        };
        let msg = err.to_string();
        assert!(msg.contains("nombre"));
        assert!(msg.contains("colonia"));
    }
}
