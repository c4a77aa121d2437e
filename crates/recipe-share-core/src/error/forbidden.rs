use super::Error;

/// Error when the caller is not allowed to act on a record, usually because
/// it belongs to another user.
#[derive(Debug)]
pub(super) struct ForbiddenError {
    message: Box<str>,
}

impl std::error::Error for ForbiddenError {}

impl core::fmt::Display for ForbiddenError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "forbidden: {}", self.message)
    }
}

impl Error {
    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Forbidden(ForbiddenError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a forbidden error.
    pub fn is_forbidden(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Forbidden(_)))
    }
}
