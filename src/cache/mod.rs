//! Cache Module
//!
//! In-memory TTL cache with FIFO eviction and a cache-aside wrapper that
//! falls back to stale values when a producer fails.

mod aside;
mod entry;
mod order;
mod stats;
mod store;


// Re-export public types
pub use aside::{ApiCache, CacheOptions, Cached, Freshness};
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::TtlStore;
