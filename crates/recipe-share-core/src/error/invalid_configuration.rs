use super::Error;

/// Error when the store configuration is missing or malformed.
///
/// This occurs when:
/// - A required environment variable is not set
/// - The store URL cannot be parsed or uses an unsupported scheme
/// - A driver was requested whose cargo feature is not enabled
#[derive(Debug)]
pub(super) struct InvalidConfiguration {
    message: Box<str>,
}

impl std::error::Error for InvalidConfiguration {}

impl core::fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfiguration(
            InvalidConfiguration {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid configuration error.
    pub fn is_invalid_configuration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidConfiguration(_)))
    }
}
