//! Unit tests for the secrets module.
