//! Cache Store Module
//!
//! Bounded key/value store with per-entry TTL, lazy expiration on read and
//! FIFO eviction by insertion order.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};

// == TTL Store ==
/// In-memory store where each entry carries its own expiration window.
#[derive(Debug)]
pub struct TtlStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Insertion order, front is evicted first
    order: InsertionOrder,
    /// Counters and configuration snapshot
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied when `set` is given none
    default_ttl: Duration,
}

impl<V: Clone> TtlStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// A capacity of zero is clamped to one so that a `set` is always readable
    /// until the next insertion.
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(capacity, default_ttl.as_millis() as u64),
            capacity,
            default_ttl,
        }
    }

    // == Get ==
    /// Returns the value for `key` if present and fresh.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let value = self.lookup(key);
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Set ==
    /// Inserts or overwrites `key`, stamping it with the current instant.
    ///
    /// `ttl` of `None` or zero uses the store default. When a new key would
    /// exceed capacity the oldest inserted key is evicted first. Overwrites
    /// keep the key's original eviction slot.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(evicted_key) = self.order.pop_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        let ttl = match ttl {
            Some(ttl) if !ttl.is_zero() => ttl,
            _ => self.default_ttl,
        };

        self.order.push(&key);
        self.entries.insert(key, CacheEntry::new(value, ttl));
        self.stats.set_size(self.entries.len());
    }

    // == Has ==
    /// True when `key` holds a fresh value. Purges the entry if it expired.
    ///
    /// Unlike `get`, this does not count towards hits or misses.
    pub fn has(&mut self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    // == Get Unexpired ==
    /// Like `get`, but an expired entry is left in place instead of purged.
    ///
    /// Used by the cache-aside path so the old value can still back a failed
    /// refresh.
    pub fn get_unexpired(&mut self, key: &str) -> Option<V> {
        let value = self
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone());
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Peek Stale ==
    /// Returns the stored value whether or not it has expired, without purging.
    pub fn peek_stale(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            self.stats.set_size(self.entries.len());
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes every entry. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.set_size(0);
        count
    }

    // == Sweep Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .order
            .iter()
            .filter(|key| {
                self.entries
                    .get(key.as_str())
                    .is_some_and(|entry| entry.is_expired_at(now))
            })
            .cloned()
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.order.remove(&key);
        }

        self.stats.record_expirations(count);
        self.stats.set_size(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns a snapshot of configuration and counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Keys ==
    /// All stored keys in insertion order, including expired ones not yet purged.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Fresh value or `None`, purging an expired entry. No stats.
    fn lookup(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_size(self.entries.len());
            return None;
        }
        Some(entry.value.clone())
    }
}
