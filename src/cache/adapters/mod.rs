//! Adapter implementations for request cache ports.

pub mod http;

pub use http::HttpResourceFetcher;
