//! Domain types for the request cache.

mod config;
mod entry;
mod error;
mod key;
mod options;

pub use config::{CacheConfig, DEFAULT_TTL};
pub use entry::{CacheEntry, Freshness};
pub use error::CacheDomainError;
pub use key::ResourceKey;
pub use options::{FetchOptions, RevalidateCallback};
