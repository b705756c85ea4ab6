//! Error types for cache domain validation.

use thiserror::Error;

/// Errors returned while constructing cache domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheDomainError {
    /// The resource key is empty after trimming.
    #[error("resource key must not be empty")]
    EmptyResourceKey,

    /// The time-to-live is zero.
    #[error("cache TTL must be greater than zero")]
    ZeroTtl,
}
