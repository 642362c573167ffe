//! Validation error types
//!
//! Errors raised when constructing or mutating domain objects. All of these
//! are recoverable by correcting the offending input; callers render the
//! message to the user.

use thiserror::Error;

/// Error for invalid, missing, or unparseable field values
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A field value is present but out of range or malformed
    #[error("{0}")]
    Invalid(String),

    /// A required field was not supplied
    #[error("{0} is required")]
    Missing(&'static str),

    /// Text input could not be parsed into the expected type
    #[error("could not parse {field}: {message}")]
    Parse {
        field: &'static str,
        message: String,
    },
}

/// Result type for validation-checked constructors and setters
pub type ValidationResult<T> = Result<T, ValidationError>;

impl ValidationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ValidationError::Invalid(message.into())
    }
}
