use super::Error;

/// Error when a store response has an unexpected structure.
///
/// This occurs when:
/// - An operation returns a different row kind than expected (count vs recipes)
/// - A single-row read returns more than one row
/// - A payload cannot be decoded into recipes or profiles
#[derive(Debug)]
pub(super) struct InvalidResult {
    message: Box<str>,
}

impl std::error::Error for InvalidResult {}

impl core::fmt::Display for InvalidResult {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid result: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid result error.
    pub fn invalid_result(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResult {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid result error.
    pub fn is_invalid_result(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidResult(_)))
    }
}
