//! News Cache - WordPress posts proxy with an in-process TTL cache
//!
//! Serves post listings through a bounded TTL cache that falls back to the
//! last stored listing when the upstream fails.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use cache::{ApiCache, CacheOptions, Cached, Freshness, TtlStore};
pub use config::Config;
pub use tasks::spawn_sweep_task;
