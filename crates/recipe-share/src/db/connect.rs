use crate::{Config, Driver, Error, Result};

use std::sync::Arc;
use url::Url;

pub(super) async fn connect(config: &Config) -> Result<Arc<dyn Driver>> {
    let url = Url::parse(&config.url)?;

    match url.scheme() {
        "memory" => connect_memory(),
        "http" | "https" => connect_postgrest(&url, config),
        "postgresql" | "postgres" => connect_postgresql(&url).await,
        scheme => Err(Error::invalid_configuration(format!(
            "unsupported store; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "memory")]
fn connect_memory() -> Result<Arc<dyn Driver>> {
    Ok(Arc::new(recipe_share_driver_memory::Memory::new()))
}

#[cfg(not(feature = "memory"))]
fn connect_memory() -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_configuration("`memory` feature not enabled"))
}

#[cfg(feature = "postgrest")]
fn connect_postgrest(url: &Url, config: &Config) -> Result<Arc<dyn Driver>> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| Error::invalid_configuration("PostgREST stores require an API key"))?;

    let mut builder = recipe_share_driver_postgrest::PostgRest::builder(url.clone(), api_key)
        .timeout(config.timeout);

    if let Some(token) = &config.access_token {
        builder = builder.access_token(token.clone());
    }

    Ok(Arc::new(builder.build()?))
}

#[cfg(not(feature = "postgrest"))]
fn connect_postgrest(_url: &Url, _config: &Config) -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_configuration("`postgrest` feature not enabled"))
}

#[cfg(feature = "postgresql")]
async fn connect_postgresql(url: &Url) -> Result<Arc<dyn Driver>> {
    let driver = recipe_share_driver_postgresql::PostgreSQL::connect(url.as_str()).await?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "postgresql"))]
async fn connect_postgresql(_url: &Url) -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_configuration("`postgresql` feature not enabled"))
}
