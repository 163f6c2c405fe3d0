//! Cache Entry Module
//!
//! Defines a single stored value together with its insertion time and TTL.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value with its own expiration window.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion time (monotonic)
    pub stored_at: Instant,
    /// How long the entry stays fresh after `stored_at`
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks expiry against an explicit instant.
    ///
    /// An entry is expired only once its age is strictly greater than its TTL,
    /// so an entry read at exactly `stored_at + ttl` is still served.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > self.ttl
    }

    /// Checks expiry against the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }

    // == Time To Live ==
    /// Remaining freshness window, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.age())
    }
}
