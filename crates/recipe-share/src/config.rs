use crate::{Error, Result};

use std::time::Duration;

/// Environment variable holding the store URL.
pub const ENV_URL: &str = "RECIPE_SHARE_URL";

/// Environment variable holding the project API key sent to PostgREST.
pub const ENV_API_KEY: &str = "RECIPE_SHARE_API_KEY";

/// Environment variable holding a user access token (JWT). When unset the API
/// key is used as the bearer token.
pub const ENV_ACCESS_TOKEN: &str = "RECIPE_SHARE_ACCESS_TOKEN";

/// Environment variable holding the HTTP timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "RECIPE_SHARE_TIMEOUT_SECS";

/// Environment variable holding the default number of recipes per list.
pub const ENV_PAGE_SIZE: &str = "RECIPE_SHARE_PAGE_SIZE";

/// How to reach the store and how to page lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `memory:`, `https://<project>.example.co` (PostgREST) or
    /// `postgresql://...`.
    pub url: String,

    pub api_key: Option<String>,

    pub access_token: Option<String>,

    /// Per-request timeout for HTTP drivers.
    pub timeout: Duration,

    /// Recipes shown by list views when no limit is given.
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: "memory:".to_string(),
            api_key: None,
            access_token: None,
            timeout: Duration::from_secs(30),
            page_size: 12,
        }
    }
}

impl Config {
    pub fn new(url: impl Into<String>) -> Self {
        Config {
            url: url.into(),
            ..Config::default()
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration from an arbitrary key lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let url = get(ENV_URL).ok_or_else(|| {
            Error::invalid_configuration(format!("missing {ENV_URL}; set it to the store URL"))
        })?;

        let mut config = Config::new(url);
        config.api_key = get(ENV_API_KEY);
        config.access_token = get(ENV_ACCESS_TOKEN);

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                Error::invalid_configuration(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds; got `{secs}`"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(size) = get(ENV_PAGE_SIZE) {
            config.page_size = match size.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(Error::invalid_configuration(format!(
                        "{ENV_PAGE_SIZE} must be a positive integer; got `{size}`"
                    )))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that the settings the URL's driver needs are present.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.url)?;

        if matches!(url.scheme(), "http" | "https") && self.api_key.is_none() {
            return Err(Error::invalid_configuration(format!(
                "missing {ENV_API_KEY}; PostgREST stores require an API key"
            )));
        }

        if self.page_size == 0 {
            return Err(Error::invalid_configuration("page size must be positive"));
        }

        Ok(())
    }
}
