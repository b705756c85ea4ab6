//! Per-call options for cached reads.

use std::fmt;
use std::sync::Arc;

/// Callback receiving the payload of a completed background revalidation.
pub type RevalidateCallback<V> = Arc<dyn Fn(V) + Send + Sync>;

/// Options for [`RequestCache::fetch_with_cache`](crate::cache::services::RequestCache::fetch_with_cache).
pub struct FetchOptions<V> {
    force: bool,
    on_revalidate: Option<RevalidateCallback<V>>,
}

impl<V> FetchOptions<V> {
    /// Creates default options: use the cache, no callback.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            force: false,
            on_revalidate: None,
        }
    }

    /// Creates options that bypass cached entries.
    #[must_use]
    pub const fn forced() -> Self {
        Self {
            force: true,
            on_revalidate: None,
        }
    }

    /// Sets whether cached entries are bypassed.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Registers a callback for background revalidations this call triggers.
    #[must_use]
    pub fn on_revalidate(mut self, callback: impl Fn(V) + Send + Sync + 'static) -> Self {
        self.on_revalidate = Some(Arc::new(callback));
        self
    }

    /// Returns `true` when cached entries are bypassed.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.force
    }

    pub(crate) fn into_callback(self) -> Option<RevalidateCallback<V>> {
        self.on_revalidate
    }
}

impl<V> Default for FetchOptions<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for FetchOptions<V> {
    fn clone(&self) -> Self {
        Self {
            force: self.force,
            on_revalidate: self.on_revalidate.clone(),
        }
    }
}

impl<V> fmt::Debug for FetchOptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("force", &self.force)
            .field("on_revalidate", &self.on_revalidate.is_some())
            .finish()
    }
}
