//! Cached payloads and their freshness.

use super::CacheConfig;
use tokio::time::Instant;

/// How a cached entry relates to the freshness window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Younger than half the TTL.
    Fresh,
    /// Servable, but due for background revalidation.
    Stale,
    /// At or past the TTL.
    Expired,
}

/// Payload captured from a successful fetch.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    data: V,
    captured_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Wraps `data` captured at `captured_at`.
    #[must_use]
    pub const fn new(data: V, captured_at: Instant) -> Self {
        Self { data, captured_at }
    }

    /// Returns the cached payload.
    #[must_use]
    pub const fn data(&self) -> &V {
        &self.data
    }

    /// Classifies the entry as of `now`.
    #[must_use]
    pub fn freshness(&self, config: CacheConfig, now: Instant) -> Freshness {
        let age = now.saturating_duration_since(self.captured_at);
        if age >= config.ttl() {
            Freshness::Expired
        } else if age > config.revalidate_after() {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }
}
