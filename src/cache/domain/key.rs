//! Resource keys identifying cacheable reads.

use super::CacheDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, non-empty identifier of a fetchable resource, such as
/// `/api/tasks?projectId=...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Creates a validated resource key.
    ///
    /// # Errors
    ///
    /// Returns [`CacheDomainError::EmptyResourceKey`] when the key is blank.
    /// Any other value is kept verbatim, whitespace included.
    pub fn new(value: impl Into<String>) -> Result<Self, CacheDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CacheDomainError::EmptyResourceKey);
        }
        Ok(Self(raw))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceKey {
    type Error = CacheDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResourceKey> for String {
    fn from(value: ResourceKey) -> Self {
        value.0
    }
}

impl AsRef<str> for ResourceKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
