//! Request cache with stale-while-revalidate reads and request coalescing.

use crate::cache::{
    domain::{CacheConfig, CacheEntry, FetchOptions, Freshness, ResourceKey, RevalidateCallback},
    ports::{FetchError, FetchResult, ResourceFetcher},
};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tokio::time::Instant;
use tracing::{debug, warn};

type SharedFetch<V> = Shared<BoxFuture<'static, FetchResult<V>>>;

struct CacheState<V> {
    entries: HashMap<ResourceKey, CacheEntry<V>>,
    inflight: HashMap<ResourceKey, SharedFetch<V>>,
}

impl<V> Default for CacheState<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            inflight: HashMap::new(),
        }
    }
}

fn lock_state<V>(state: &Mutex<CacheState<V>>) -> MutexGuard<'_, CacheState<V>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Claim on the inflight slot of one key, held by the task running its fetch.
///
/// Settling stores a successful result and frees the slot. If the task is
/// dropped first, because the fetch panicked or the runtime shut down, the
/// slot is freed on drop so the next read starts a new fetch.
struct InflightSlot<V> {
    state: Arc<Mutex<CacheState<V>>>,
    key: Option<ResourceKey>,
}

impl<V: Clone> InflightSlot<V> {
    fn settle(mut self, result: &FetchResult<V>) {
        let Some(key) = self.key.take() else {
            return;
        };
        let mut guard = lock_state(&self.state);
        guard.inflight.remove(&key);
        if let Ok(data) = result {
            guard
                .entries
                .insert(key, CacheEntry::new(data.clone(), Instant::now()));
        }
    }
}

impl<V> Drop for InflightSlot<V> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            lock_state(&self.state).inflight.remove(&key);
            warn!(%key, "fetch ended without settling, inflight slot released");
        }
    }
}

/// Keyed read-through cache over a [`ResourceFetcher`].
///
/// Entries younger than half the TTL are served directly. Older entries
/// that have not expired are served immediately and refreshed in the
/// background. Concurrent reads of the same key share a single fetch.
///
/// Fetches run on spawned tasks and always complete, so a caller dropping
/// its future does not abort a request other callers are waiting on.
/// Invalidation never cancels an inflight fetch; its result is stored
/// when it completes.
pub struct RequestCache<F: ResourceFetcher> {
    fetcher: Arc<F>,
    config: CacheConfig,
    state: Arc<Mutex<CacheState<F::Output>>>,
}

impl<F: ResourceFetcher> Clone for RequestCache<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            config: self.config,
            state: Arc::clone(&self.state),
        }
    }
}

impl<F: ResourceFetcher> RequestCache<F> {
    /// Creates an empty cache reading through `fetcher`.
    #[must_use]
    pub fn new(fetcher: Arc<F>, config: CacheConfig) -> Self {
        Self {
            fetcher,
            config,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Returns the freshness configuration.
    #[must_use]
    pub const fn config(&self) -> CacheConfig {
        self.config
    }

    /// Reads `key`, serving cached data when it is still usable.
    ///
    /// A forced read skips the cache lookup but still joins a fetch that is
    /// already inflight for the same key.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] of the underlying fetch. Every caller
    /// sharing that fetch receives the same error and nothing is cached.
    pub async fn fetch_with_cache(
        &self,
        key: &ResourceKey,
        options: FetchOptions<F::Output>,
    ) -> FetchResult<F::Output> {
        let forced = options.is_forced();
        let pending = {
            let mut state = lock_state(&self.state);
            if !forced {
                if let Some((data, freshness)) = self.lookup(&mut state, key) {
                    if freshness == Freshness::Stale {
                        self.revalidate(&mut state, key, options.into_callback());
                    }
                    return Ok(data);
                }
            }
            self.join_or_start(&mut state, key)
        };
        pending.await
    }

    /// Drops the cached entry for `key`.
    ///
    /// Returns `true` when an entry was removed.
    pub fn invalidate(&self, key: &ResourceKey) -> bool {
        let removed = lock_state(&self.state).entries.remove(key).is_some();
        debug!(%key, removed, "cache entry invalidated");
        removed
    }

    /// Drops every cached entry.
    pub fn invalidate_all(&self) {
        let mut state = lock_state(&self.state);
        let count = state.entries.len();
        state.entries.clear();
        debug!(count, "cache cleared");
    }

    /// Returns whether an entry for `key` is stored, whatever its age.
    #[must_use]
    pub fn is_cached(&self, key: &ResourceKey) -> bool {
        lock_state(&self.state).entries.contains_key(key)
    }

    /// Returns the number of fetches currently inflight.
    #[must_use]
    pub fn inflight_count(&self) -> usize {
        lock_state(&self.state).inflight.len()
    }

    fn lookup(
        &self,
        state: &mut CacheState<F::Output>,
        key: &ResourceKey,
    ) -> Option<(F::Output, Freshness)> {
        let entry = state.entries.get(key)?;
        let freshness = entry.freshness(self.config, Instant::now());
        if freshness == Freshness::Expired {
            state.entries.remove(key);
            debug!(%key, "expired cache entry evicted");
            return None;
        }
        Some((entry.data().clone(), freshness))
    }

    fn join_or_start(
        &self,
        state: &mut CacheState<F::Output>,
        key: &ResourceKey,
    ) -> SharedFetch<F::Output> {
        if let Some(pending) = state.inflight.get(key) {
            debug!(%key, "joining inflight fetch");
            return pending.clone();
        }
        self.start_fetch(state, key)
    }

    fn start_fetch(
        &self,
        state: &mut CacheState<F::Output>,
        key: &ResourceKey,
    ) -> SharedFetch<F::Output> {
        debug!(%key, "starting fetch");
        let fetcher = Arc::clone(&self.fetcher);
        let owned_key = key.clone();
        let slot = InflightSlot {
            state: Arc::clone(&self.state),
            key: Some(key.clone()),
        };
        let handle = tokio::spawn(async move {
            let result = fetcher.fetch(&owned_key).await;
            slot.settle(&result);
            result
        });
        let pending = async move {
            handle
                .await
                .unwrap_or_else(|err| Err(FetchError::Aborted(err.to_string())))
        }
        .boxed()
        .shared();
        state.inflight.insert(key.clone(), pending.clone());
        pending
    }

    fn revalidate(
        &self,
        state: &mut CacheState<F::Output>,
        key: &ResourceKey,
        callback: Option<RevalidateCallback<F::Output>>,
    ) {
        if state.inflight.contains_key(key) {
            debug!(%key, "revalidation skipped, fetch already inflight");
            return;
        }
        let pending = self.start_fetch(state, key);
        let owned_key = key.clone();
        tokio::spawn(async move {
            match pending.await {
                Ok(data) => {
                    if let Some(notify) = callback {
                        notify(data);
                    }
                }
                Err(err) => warn!(key = %owned_key, error = %err, "background revalidation failed"),
            }
        });
    }
}
