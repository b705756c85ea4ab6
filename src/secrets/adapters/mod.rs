//! Adapter implementations for the cipher port.

pub mod memory;

pub use memory::InMemorySecretCipher;
