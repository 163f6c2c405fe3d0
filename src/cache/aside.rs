//! Cache-Aside Module
//!
//! Shared cache handle with a `with_cache` wrapper that serves fresh values,
//! calls a producer on miss, and falls back to the last stored value when the
//! producer fails.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, TtlStore};

// == Options ==
/// Per-call options for [`ApiCache::with_cache`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheOptions {
    /// TTL for the stored result, store default when `None`
    pub ttl: Option<Duration>,
    /// Skip the cached value and always call the producer
    pub force_refresh: bool,
}

impl CacheOptions {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::default()
        }
    }

    pub fn force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }
}

// == Freshness ==
/// Where a value returned by `with_cache` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Served from a live cache entry, producer not called
    Hit,
    /// Produced by this call and stored
    Fetched,
    /// Producer failed, previously stored value substituted
    Stale,
}

impl Freshness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Hit => "hit",
            Freshness::Fetched => "miss",
            Freshness::Stale => "stale",
        }
    }
}

/// A value tagged with its [`Freshness`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<V> {
    pub value: V,
    pub freshness: Freshness,
}

impl<V> Cached<V> {
    fn new(value: V, freshness: Freshness) -> Self {
        Self { value, freshness }
    }

    pub fn is_stale(&self) -> bool {
        self.freshness == Freshness::Stale
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

// == Api Cache ==
/// Cloneable handle to a process-wide [`TtlStore`].
///
/// Each store operation takes the lock for its own duration only. The lock is
/// never held while a producer runs, so concurrent misses on one key each call
/// their producer.
#[derive(Debug)]
pub struct ApiCache<V> {
    store: Arc<RwLock<TtlStore<V>>>,
}

impl<V> Clone for ApiCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<V: Clone> ApiCache<V> {
    // == Constructor ==
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self::from_store(TtlStore::new(capacity, default_ttl))
    }

    pub fn from_store(store: TtlStore<V>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    // == With Cache ==
    /// Returns the cached value for `key` or produces, stores and returns a new one.
    ///
    /// On producer failure, any value still stored under `key` (expired or not)
    /// is returned tagged [`Freshness::Stale`]. With nothing to substitute, the
    /// producer's error is returned unchanged.
    pub async fn with_cache<F, Fut, E>(
        &self,
        key: &str,
        producer: F,
        options: CacheOptions,
    ) -> Result<Cached<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if !options.force_refresh {
            let cached = self.store.write().await.get_unexpired(key);
            if let Some(value) = cached {
                debug!("cache hit for key: {}", key);
                return Ok(Cached::new(value, Freshness::Hit));
            }
            debug!("cache miss for key: {}", key);
        }

        match producer().await {
            Ok(value) => {
                self.store
                    .write()
                    .await
                    .set(key, value.clone(), options.ttl);
                Ok(Cached::new(value, Freshness::Fetched))
            }
            Err(err) => {
                let fallback = self.store.read().await.peek_stale(key);
                match fallback {
                    Some(value) => {
                        warn!("producer failed, returning cached data for key: {}", key);
                        Ok(Cached::new(value, Freshness::Stale))
                    }
                    None => Err(err),
                }
            }
        }
    }

    // == Store Access ==
    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.write().await.get(key)
    }

    pub async fn set(&self, key: &str, value: V, ttl: Option<Duration>) {
        self.store.write().await.set(key, value, ttl);
    }

    pub async fn has(&self, key: &str) -> bool {
        self.store.write().await.has(key)
    }

    // == Management ==
    /// Removes every entry, returning how many were dropped.
    pub async fn clear_all(&self) -> usize {
        self.store.write().await.clear()
    }

    /// Removes one entry.
    pub async fn clear(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    /// Removes all expired entries, returning the count.
    pub async fn clear_expired(&self) -> usize {
        self.store.write().await.sweep_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }
}
