//! Cache Statistics Module
//!
//! Store configuration plus hit, miss, eviction and expiration counters.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of store size, configuration and counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of stored entries, including expired ones not yet purged
    pub size: usize,
    /// Maximum number of entries
    pub capacity: usize,
    /// Default TTL in milliseconds
    pub default_ttl_ms: u64,
    /// Reads that returned a fresh value
    pub hits: u64,
    /// Reads that found nothing or an expired value
    pub misses: u64,
    /// Entries dropped to make room for a new key
    pub evictions: u64,
    /// Entries purged because their TTL elapsed
    pub expirations: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates zeroed counters for a store of the given shape.
    pub fn new(capacity: usize, default_ttl_ms: u64) -> Self {
        Self {
            capacity,
            default_ttl_ms,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Adds `count` purged entries to the expiration counter.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}
