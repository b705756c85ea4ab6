//! Read and write paths for secret values.

pub mod fail_soft;

pub use fail_soft::{decrypt_or_passthrough, encrypt_secret};
