//! Client-side request cache.
//!
//! Reads go through a [`services::RequestCache`] keyed by [`domain::ResourceKey`].
//! Entries are served fresh for the first half of their TTL, served stale
//! while a background refresh runs for the second half, and refetched once
//! the TTL has elapsed. Concurrent reads of one key share a single fetch.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
