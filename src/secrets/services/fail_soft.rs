//! Secret helpers with empty-value passthrough and fail-soft decryption.

use crate::secrets::ports::{SecretCipher, SecretCipherResult};
use tracing::warn;

/// Encrypts a secret for storage. Empty values are stored as-is.
///
/// # Errors
///
/// Propagates the cipher's error for non-empty values.
pub fn encrypt_secret(cipher: &impl SecretCipher, plaintext: &str) -> SecretCipherResult<String> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }
    cipher.encrypt(plaintext)
}

/// Decrypts a stored secret, returning it unchanged when decryption fails.
///
/// Empty values are returned without consulting the cipher.
#[must_use]
pub fn decrypt_or_passthrough(cipher: &impl SecretCipher, ciphertext: &str) -> String {
    if ciphertext.is_empty() {
        return String::new();
    }
    cipher.decrypt(ciphertext).unwrap_or_else(|err| {
        warn!(error = %err, "decryption failed, returning stored value");
        ciphertext.to_owned()
    })
}
