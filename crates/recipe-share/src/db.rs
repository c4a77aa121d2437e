mod builder;
pub use builder::Builder;

mod connect;

use crate::{driver::Operation, resolve::ProfileJoinResolver, Config, Driver, Result};

use recipe_share_core::driver::Response;
use std::sync::Arc;

/// Handle to a recipe store. Cheap to clone; clones share the driver.
#[derive(Debug, Clone)]
pub struct Db {
    driver: Arc<dyn Driver>,
    config: Arc<Config>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Wraps an already constructed driver with the default configuration.
    pub fn new(driver: impl Driver) -> Db {
        Db::builder().build(driver)
    }

    /// Connects using configuration read from the environment.
    pub async fn from_env() -> Result<Db> {
        let config = Config::from_env()?;
        Db::builder().config(config).connect().await
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read path that embeds owner profiles into recipes.
    pub fn resolver(&self) -> ProfileJoinResolver<'_> {
        ProfileJoinResolver::new(self.driver())
    }

    /// Creates the store's tables when they do not exist.
    pub async fn push_schema(&self) -> Result<()> {
        self.driver.push_schema().await?;
        tracing::info!(driver = self.driver.name(), "schema pushed");
        Ok(())
    }

    /// Drops every recipe and profile and recreates an empty schema.
    pub async fn reset_db(&self) -> Result<()> {
        self.driver.reset_db().await?;
        tracing::info!(driver = self.driver.name(), "store reset");
        Ok(())
    }

    /// Executes a single operation against the store.
    pub async fn exec(&self, op: impl Into<Operation>) -> Result<Response> {
        let op = op.into();
        tracing::debug!(driver = self.driver.name(), ?op, "exec");
        self.driver.exec(op).await
    }
}
