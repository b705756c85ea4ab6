//! Freshness settings for the request cache.

use super::CacheDomainError;
use std::time::Duration;

/// Default time an entry is served without a blocking refetch.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Freshness window of cached entries.
///
/// An entry younger than half the TTL is served as is. Between half the TTL
/// and the TTL it is served while a background revalidation refreshes it.
/// From the TTL on it is refetched before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    ttl: Duration,
}

impl CacheConfig {
    /// Creates a config with the given TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheDomainError::ZeroTtl`] for a zero duration.
    pub const fn new(ttl: Duration) -> Result<Self, CacheDomainError> {
        if ttl.is_zero() {
            return Err(CacheDomainError::ZeroTtl);
        }
        Ok(Self { ttl })
    }

    /// Returns the TTL.
    #[must_use]
    pub const fn ttl(self) -> Duration {
        self.ttl
    }

    /// Returns the age past which a hit triggers background revalidation.
    #[must_use]
    pub fn revalidate_after(self) -> Duration {
        self.ttl / 2
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL }
    }
}
