//! In-memory cipher for tests and local development.

use crate::secrets::ports::{SecretCipher, SecretCipherError, SecretCipherResult};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};
use uuid::Uuid;

/// Sealing cipher keeping plaintexts in memory.
///
/// Ciphertexts take the form `{key_id}:{token}` and reveal nothing about
/// the plaintext. A cipher only opens tokens sealed under its own key id.
#[derive(Debug, Clone)]
pub struct InMemorySecretCipher {
    key_id: String,
    sealed: Arc<RwLock<HashMap<Uuid, String>>>,
}

impl InMemorySecretCipher {
    /// Creates a cipher using `key_id`.
    #[must_use]
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            sealed: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the key id stamped on ciphertexts.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

impl SecretCipher for InMemorySecretCipher {
    fn encrypt(&self, plaintext: &str) -> SecretCipherResult<String> {
        let token = Uuid::new_v4();
        self.sealed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token, plaintext.to_owned());
        Ok(format!("{}:{token}", self.key_id))
    }

    fn decrypt(&self, ciphertext: &str) -> SecretCipherResult<String> {
        let (key_id, token) = ciphertext
            .rsplit_once(':')
            .ok_or(SecretCipherError::MalformedCiphertext)?;
        if key_id != self.key_id {
            return Err(SecretCipherError::KeyMismatch {
                expected: self.key_id.clone(),
                found: key_id.to_owned(),
            });
        }
        let parsed = Uuid::parse_str(token).map_err(|_| SecretCipherError::MalformedCiphertext)?;
        self.sealed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&parsed)
            .cloned()
            .ok_or(SecretCipherError::UnknownCiphertext)
    }
}
