//! Port contracts for secret encryption.

pub mod cipher;

pub use cipher::{SecretCipher, SecretCipherError, SecretCipherResult};
