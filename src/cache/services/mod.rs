//! Services coordinating cached reads.

pub mod request_cache;

pub use request_cache::RequestCache;
