//! Unit tests for the request cache.
