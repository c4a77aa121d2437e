use super::Error;

/// Error when the store cannot resolve the relationship a joined read asks
/// for.
///
/// PostgREST reports this as `PGRST200` when its schema cache has no foreign
/// key between the two tables. The native PostgreSQL driver raises it when the
/// joined statement refers to a missing relation or column.
#[derive(Debug)]
pub(super) struct JoinUnavailable {
    pub(super) code: Box<str>,
    message: Box<str>,
}

impl std::error::Error for JoinUnavailable {}

impl core::fmt::Display for JoinUnavailable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "join unavailable [{}]: {}", self.code, self.message)
    }
}

impl Error {
    /// Creates a join unavailable error carrying the store's code.
    pub fn join_unavailable(code: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::JoinUnavailable(JoinUnavailable {
            code: code.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a join unavailable error.
    pub fn is_join_unavailable(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::JoinUnavailable(_)))
    }

    /// Returns the store's machine-readable error code, if any error in the
    /// chain carries one.
    pub fn code(&self) -> Option<&str> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::JoinUnavailable(err) => Some(&*err.code),
            super::ErrorKind::Store(err) => Some(&*err.code),
            _ => None,
        })
    }
}
