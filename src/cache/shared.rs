//! Shared Cache Module
//!
//! Thread-safe handle over a [`TtlCache`] with get-or-populate semantics.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::cache::{CacheStats, TtlCache};

/// Per-key fetch lock plus the number of callers holding or awaiting it.
#[derive(Default)]
struct Flight {
    lock: Arc<Mutex<()>>,
    waiters: usize,
}

type FlightMap = HashMap<String, Flight>;

// == Shared Cache ==
/// Cloneable handle to one TTL cache instance.
///
/// Owned by the application's composition root and handed to whoever needs
/// it; clones share the same entries.
pub struct SharedCache<V> {
    inner: Arc<RwLock<TtlCache<V>>>,
    /// Per-key locks held while a miss is being fetched
    in_flight: Arc<StdMutex<FlightMap>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<V> Default for SharedCache<V> {
    fn default() -> Self {
        Self::new(TtlCache::default())
    }
}

impl<V> SharedCache<V> {
    /// Wraps an existing cache.
    pub fn new(cache: TtlCache<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
            in_flight: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    pub async fn set(&self, key: impl Into<String>, value: V, ttl_ms: Option<u64>) {
        self.inner.write().await.set(key, value, ttl_ms);
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    /// Removes every entry whose key matches `predicate`.
    pub async fn delete_where<F>(&self, predicate: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        self.inner.write().await.delete_where(predicate)
    }

    /// Removes all entries and returns how many there were.
    pub async fn clear(&self) -> usize {
        let mut cache = self.inner.write().await;
        let removed = cache.len();
        cache.clear();
        removed
    }

    /// Sweeps expired entries. Returns the number removed.
    pub async fn cleanup(&self) -> usize {
        self.inner.write().await.cleanup()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    // == Single-flight slots ==
    fn claim(&self, key: &str) -> Arc<Mutex<()>> {
        let mut flights = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        let flight = flights.entry(key.to_string()).or_default();
        flight.waiters += 1;
        Arc::clone(&flight.lock)
    }

    fn release(&self, key: &str) {
        let mut flights = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(flight) = flights.get_mut(key) {
            flight.waiters = flight.waiters.saturating_sub(1);
            if flight.waiters == 0 {
                flights.remove(key);
            }
        }
    }
}

impl<V: Clone> SharedCache<V> {
    /// Returns the value if present and fresh; deletes it if stale.
    pub async fn get(&self, key: &str) -> Option<V> {
        // Write lock: a stale hit removes the entry.
        self.inner.write().await.get(key)
    }

    // == With Cache ==
    /// Returns the cached value for `key`, or runs `fetcher` and caches its
    /// successful result under `ttl_ms`.
    ///
    /// Concurrent misses on the same key are serialized: the first caller
    /// fetches, the others wait and then read what it stored. A failed fetch
    /// stores nothing and its error goes only to its own caller; the next
    /// waiter fetches again.
    pub async fn with_cache<F, Fut, E>(
        &self,
        key: &str,
        fetcher: F,
        ttl_ms: Option<u64>,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            debug!(key, "cache hit");
            return Ok(value);
        }

        let slot = self.claim(key);
        let _flight = FlightGuard { cache: self, key };
        let _lock = slot.lock().await;

        if let Some(value) = self.inner.read().await.peek(key) {
            debug!(key, "cache filled by concurrent fetch");
            return Ok(value);
        }

        debug!(key, "cache miss, fetching");
        let value = fetcher().await?;
        self.set(key, value.clone(), ttl_ms).await;
        Ok(value)
    }
}

/// Releases the single-flight slot even if the fetch future is dropped.
struct FlightGuard<'a, V> {
    cache: &'a SharedCache<V>,
    key: &'a str,
}

impl<V> Drop for FlightGuard<'_, V> {
    fn drop(&mut self) {
        self.cache.release(self.key);
    }
}
