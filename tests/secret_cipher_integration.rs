//! Fail-soft secret handling against a mocked cipher.

use rstest::rstest;
use taskdeck::secrets::{
    ports::SecretCipherError,
    services::{decrypt_or_passthrough, encrypt_secret},
};

mod mocks {
    use mockall::mock;
    use taskdeck::secrets::ports::{SecretCipher, SecretCipherResult};

    mock! {
        pub Cipher {}

        impl SecretCipher for Cipher {
            fn encrypt(&self, plaintext: &str) -> SecretCipherResult<String>;
            fn decrypt(&self, ciphertext: &str) -> SecretCipherResult<String>;
        }
    }
}

use mocks::MockCipher;

#[rstest]
fn decrypt_failure_returns_stored_value() {
    let mut cipher = MockCipher::new();
    cipher
        .expect_decrypt()
        .withf(|ciphertext| ciphertext == "v1:stale")
        .times(1)
        .returning(|_| Err(SecretCipherError::MalformedCiphertext));

    assert_eq!(decrypt_or_passthrough(&cipher, "v1:stale"), "v1:stale");
}

#[rstest]
fn decrypt_success_returns_plaintext() {
    let mut cipher = MockCipher::new();
    cipher
        .expect_decrypt()
        .times(1)
        .returning(|_| Ok("s3cret".to_owned()));

    assert_eq!(decrypt_or_passthrough(&cipher, "v1:sealed"), "s3cret");
}

#[rstest]
fn empty_values_never_reach_the_cipher() {
    let mut cipher = MockCipher::new();
    cipher.expect_encrypt().never();
    cipher.expect_decrypt().never();

    assert_eq!(encrypt_secret(&cipher, ""), Ok(String::new()));
    assert_eq!(decrypt_or_passthrough(&cipher, ""), "");
}

#[rstest]
fn encryption_errors_propagate() {
    let mut cipher = MockCipher::new();
    cipher
        .expect_encrypt()
        .times(1)
        .returning(|_| Err(SecretCipherError::Backend("key store offline".to_owned())));

    assert_eq!(
        encrypt_secret(&cipher, "token"),
        Err(SecretCipherError::Backend("key store offline".to_owned()))
    );
}
