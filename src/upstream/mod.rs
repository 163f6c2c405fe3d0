//! Upstream Module
//!
//! Client for the WordPress REST backend whose post listings are cached.

mod wordpress;

pub use wordpress::WordPressClient;
