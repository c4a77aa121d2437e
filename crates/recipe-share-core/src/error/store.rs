use super::Error;

/// Error reported by the store itself, with its machine-readable code.
///
/// Codes are passed through opaquely: PostgREST `PGRST*` codes, PostgreSQL
/// SQLSTATE values, or HTTP status codes when the body carried none.
#[derive(Debug)]
pub(super) struct StoreError {
    pub(super) code: Box<str>,
    message: Box<str>,
}

impl std::error::Error for StoreError {}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "store error [{}]: {}", self.code, self.message)
    }
}

impl Error {
    /// Creates a store error.
    pub fn store(code: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Store(StoreError {
            code: code.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error was reported by the store.
    pub fn is_store(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Store(_)))
    }
}
