use super::{connect, Db};
use crate::{Config, Driver, Result};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Overrides the store URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Builds a handle around a driver the caller constructed.
    pub fn build(self, driver: impl Driver) -> Db {
        Db {
            driver: Arc::new(driver),
            config: Arc::new(self.config),
        }
    }

    /// Picks a driver from the configured URL's scheme and connects it.
    pub async fn connect(self) -> Result<Db> {
        self.config.validate()?;
        let driver = connect::connect(&self.config).await?;

        tracing::info!(driver = driver.name(), "connected to recipe store");

        Ok(Db {
            driver,
            config: Arc::new(self.config),
        })
    }
}
