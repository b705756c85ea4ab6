//! Encryption collaborator for credential and environment variable values.
//!
//! The cipher itself is a port. Reads go through
//! [`services::decrypt_or_passthrough`], which never fails: values that
//! cannot be decrypted, for example after a key rotation, are returned as
//! stored.

pub mod adapters;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
