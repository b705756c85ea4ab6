//! Runtime configuration read from environment variables.

use crate::{
    cache::{adapters::HttpResourceFetcher, domain::CacheConfig},
    task::adapters::postgres::{PostgresTaskRepository, TaskPgPool},
};
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use std::time::Duration;
use thiserror::Error;

/// Base URL for the HTTP fetcher.
pub const API_BASE_URL_ENV: &str = "TASKDECK_API_BASE_URL";
/// Cache TTL in whole seconds.
pub const CACHE_TTL_SECS_ENV: &str = "TASKDECK_CACHE_TTL_SECS";
/// PostgreSQL connection URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The TTL variable is not a positive whole number of seconds.
    #[error("TASKDECK_CACHE_TTL_SECS must be a positive integer, got {0:?}")]
    InvalidCacheTtl(String),

    /// A component was requested whose variable is unset.
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardConfig {
    api_base_url: Option<String>,
    cache: CacheConfig,
    database_url: Option<String>,
}

impl DashboardConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCacheTtl`] when the TTL variable is set
    /// but not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCacheTtl`] when the TTL variable is set
    /// but not a positive integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let cache = match read(CACHE_TTL_SECS_ENV) {
            Some(raw) => parse_ttl(&raw)?,
            None => CacheConfig::default(),
        };
        Ok(Self {
            api_base_url: read(API_BASE_URL_ENV),
            cache,
            database_url: read(DATABASE_URL_ENV),
        })
    }

    /// Returns the API base URL, if configured.
    #[must_use]
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    /// Returns the cache freshness configuration.
    #[must_use]
    pub const fn cache(&self) -> CacheConfig {
        self.cache
    }

    /// Returns the database URL, if configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Builds an HTTP fetcher against the configured API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no base URL is configured.
    pub fn http_fetcher(&self) -> Result<HttpResourceFetcher, ConfigError> {
        self.api_base_url()
            .map(HttpResourceFetcher::new)
            .ok_or(ConfigError::Missing(API_BASE_URL_ENV))
    }

    /// Builds a lazily connecting task repository for the configured
    /// database.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no database URL is configured.
    pub fn task_repository(&self) -> Result<PostgresTaskRepository, ConfigError> {
        let url = self
            .database_url()
            .ok_or(ConfigError::Missing(DATABASE_URL_ENV))?;
        let pool: TaskPgPool =
            Pool::builder().build_unchecked(ConnectionManager::<PgConnection>::new(url));
        Ok(PostgresTaskRepository::new(pool))
    }
}

fn parse_ttl(raw: &str) -> Result<CacheConfig, ConfigError> {
    raw.parse::<u64>()
        .ok()
        .map(Duration::from_secs)
        .and_then(|ttl| CacheConfig::new(ttl).ok())
        .ok_or_else(|| ConfigError::InvalidCacheTtl(raw.to_owned()))
}
