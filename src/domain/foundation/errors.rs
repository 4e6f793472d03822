//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' does not accept '{value}' (expected one of: {expected})")]
    UnknownValue {
        field: String,
        value: String,
        expected: String,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an error for a value outside the field's vocabulary.
    pub fn unknown_value(field: impl Into<String>, value: impl Into<String>, expected: &[&str]) -> Self {
        ValidationError::UnknownValue {
            field: field.into(),
            value: value.into(),
            expected: expected.join(", "),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::UnknownValue { field, .. } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    EmptyField,
    UnknownValue,

    // Request errors
    MalformedRequest,
}

impl From<&ValidationError> for ErrorCode {
    fn from(error: &ValidationError) -> Self {
        match error {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::UnknownValue { .. } => ErrorCode::UnknownValue,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::UnknownValue => "UNKNOWN_VALUE",
            ErrorCode::MalformedRequest => "INVALID_BODY",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(error: ValidationError) -> Self {
        DomainError::new(ErrorCode::from(&error), error.to_string())
            .with_detail("field", error.field().to_string())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("presenceChannels");
        assert_eq!(format!("{}", err), "Field 'presenceChannels' cannot be empty");
    }

    #[test]
    fn validation_error_unknown_value_lists_vocabulary() {
        let err = ValidationError::unknown_value("teamShape", "army", &["solo", "small_team"]);
        assert_eq!(
            format!("{}", err),
            "Field 'teamShape' does not accept 'army' (expected one of: solo, small_team)"
        );
        assert_eq!(err.field(), "teamShape");
    }

    #[test]
    fn domain_error_from_validation_keeps_field() {
        let err: DomainError = ValidationError::empty_field("invoicing").into();
        assert_eq!(err.code, ErrorCode::EmptyField);
        assert_eq!(err.details.get("field"), Some(&"invoicing".to_string()));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::MalformedRequest, "Body is not JSON");
        assert_eq!(format!("{}", err), "[INVALID_BODY] Body is not JSON");
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::UnknownValue), "UNKNOWN_VALUE");
        assert_eq!(format!("{}", ErrorCode::EmptyField), "EMPTY_FIELD");
        assert_eq!(format!("{}", ErrorCode::MalformedRequest), "INVALID_BODY");
    }
}
