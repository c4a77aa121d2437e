mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::async_trait;

use std::fmt::Debug;

/// A store backend.
///
/// Drivers execute one [`Operation`] per call and report failures with the
/// store's own codes; they never retry or fall back on their own.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Short name used in logs, e.g. `"postgrest"`.
    fn name(&self) -> &'static str;

    /// Execute a store operation
    async fn exec(&self, op: Operation) -> crate::Result<Response>;

    /// Creates the `profiles` and `recipes` tables when they do not exist.
    /// Stores whose schema is managed elsewhere have nothing to do.
    async fn push_schema(&self) -> crate::Result<()> {
        Ok(())
    }

    /// Drops every table and row, then recreates an empty schema.
    async fn reset_db(&self) -> crate::Result<()> {
        Err(crate::Error::invalid_configuration(format!(
            "the `{}` store cannot be reset from here",
            self.name()
        )))
    }
}
