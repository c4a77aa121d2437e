use super::Error;

/// Error when user input fails validation.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) kind: ValidationErrorKind,
}

#[derive(Debug)]
pub(super) enum ValidationErrorKind {
    /// A required field was empty after trimming
    Required { field: &'static str },

    /// A text field exceeds its maximum length, in characters
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A value is outside the field's accepted set or range
    Invalid { field: &'static str, message: Box<str> },
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            ValidationErrorKind::Required { field } => write!(f, "{field} is required"),
            ValidationErrorKind::TooLong { field, len, max } => write!(
                f,
                "{field} is too long: {len} characters (maximum: {max})"
            ),
            ValidationErrorKind::Invalid { field, message } => {
                write!(f, "invalid {field}: {message}")
            }
        }
    }
}

impl Error {
    /// Creates a validation error for a missing required field.
    pub fn validation_required(field: &'static str) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::Required { field },
        }))
    }

    /// Creates a validation error for a field that exceeds its length limit.
    pub fn validation_too_long(field: &'static str, len: usize, max: usize) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::TooLong { field, len, max },
        }))
    }

    /// Creates a validation error for a value outside the accepted set.
    pub fn validation_invalid(field: &'static str, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::Invalid {
                field,
                message: message.into().into(),
            },
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Validation(_)))
    }
}
