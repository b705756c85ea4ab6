//! Port contracts for the request cache.

pub mod fetcher;

pub use fetcher::{FetchError, FetchResult, ResourceFetcher};
