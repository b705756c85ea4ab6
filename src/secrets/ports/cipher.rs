//! Cipher port.

use thiserror::Error;

/// Result type for cipher operations.
pub type SecretCipherResult<T> = Result<T, SecretCipherError>;

/// Symmetric cipher turning secret values into storable text and back.
pub trait SecretCipher: Send + Sync {
    /// Encrypts `plaintext`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretCipherError`] when the value cannot be encrypted.
    fn encrypt(&self, plaintext: &str) -> SecretCipherResult<String>;

    /// Decrypts `ciphertext`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretCipherError`] when the value was not produced by this
    /// cipher or its key.
    fn decrypt(&self, ciphertext: &str) -> SecretCipherResult<String>;
}

/// Errors returned by cipher implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretCipherError {
    /// The ciphertext is not in the expected format.
    #[error("malformed ciphertext")]
    MalformedCiphertext,

    /// The ciphertext was produced under another key.
    #[error("ciphertext was sealed with key {found}, expected {expected}")]
    KeyMismatch {
        /// Key the cipher holds.
        expected: String,
        /// Key named by the ciphertext.
        found: String,
    },

    /// No plaintext is known for the ciphertext.
    #[error("unknown ciphertext")]
    UnknownCiphertext,

    /// The backend failed.
    #[error("cipher backend error: {0}")]
    Backend(String),
}
