//! API Module
//!
//! HTTP handlers and routing for the posts proxy.
//!
//! # Endpoints
//! - `GET /api/posts` - Cached post listing from WordPress
//!
//! Only mounted with `CACHE_ADMIN_ENABLED`:
//! - `GET /cache/stats` - Cache size, configuration and counters
//! - `GET /cache/keys` - Stored keys in insertion order
//! - `GET /cache/has/:key` - Whether a fresh entry exists
//! - `DELETE /cache/:key` - Remove one entry
//! - `DELETE /cache` - Remove all entries
//! - `POST /cache/sweep` - Remove expired entries
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
