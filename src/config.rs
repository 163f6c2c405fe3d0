//! Configuration Module
//!
//! Handles loading server, cache and upstream settings from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Shortest allowed sweep interval in seconds
pub const MIN_SWEEP_INTERVAL_SECS: u64 = 1;

/// Longest allowed sweep interval in seconds (one week)
pub const MAX_SWEEP_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cached responses
    pub max_entries: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    pub default_ttl_ms: u64,
    /// TTL in milliseconds for cached post listings
    pub posts_ttl_ms: u64,
    /// Expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// WordPress REST base URL, e.g. `https://example.com/wp-json/wp/v2`
    pub wp_api_url: Option<String>,
    /// WordPress user for basic auth
    pub wp_username: Option<String>,
    /// WordPress application password for basic auth
    pub wp_app_password: Option<String>,
    /// Mount the `/cache/*` management routes
    pub cache_admin_enabled: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 50)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `POSTS_TTL_MS` - TTL for post listings in milliseconds (default: 180000)
    /// - `SWEEP_INTERVAL_SECS` - Expiry sweep frequency in seconds (default: 600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 10)
    /// - `WP_API_URL`, `WP_USERNAME`, `WP_APP_PASSWORD` - Upstream access (optional)
    /// - `CACHE_ADMIN_ENABLED` - Expose `/cache/*` management routes (default: false)
    ///
    /// `SWEEP_INTERVAL_SECS` is clamped to
    /// `MIN_SWEEP_INTERVAL_SECS..=MAX_SWEEP_INTERVAL_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("CACHE_MAX_ENTRIES").unwrap_or(defaults.max_entries),
            default_ttl_ms: parse_var("CACHE_DEFAULT_TTL_MS").unwrap_or(defaults.default_ttl_ms),
            posts_ttl_ms: parse_var("POSTS_TTL_MS").unwrap_or(defaults.posts_ttl_ms),
            sweep_interval: clamp_sweep_interval(
                parse_var("SWEEP_INTERVAL_SECS").unwrap_or(defaults.sweep_interval),
            ),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or(defaults.upstream_timeout),
            wp_api_url: non_empty_var("WP_API_URL"),
            wp_username: non_empty_var("WP_USERNAME"),
            wp_app_password: non_empty_var("WP_APP_PASSWORD"),
            cache_admin_enabled: flag_var("CACHE_ADMIN_ENABLED")
                .unwrap_or(defaults.cache_admin_enabled),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }

    pub fn posts_ttl(&self) -> Duration {
        Duration::from_millis(self.posts_ttl_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 50,
            default_ttl_ms: 5 * 60 * 1000,
            posts_ttl_ms: 3 * 60 * 1000,
            sweep_interval: 10 * 60,
            server_port: 3000,
            upstream_timeout: 10,
            wp_api_url: None,
            wp_username: None,
            wp_app_password: None,
            cache_admin_enabled: false,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Keeps the sweep period non-zero and small enough to add to an `Instant`.
fn clamp_sweep_interval(secs: u64) -> u64 {
    let clamped = secs.clamp(MIN_SWEEP_INTERVAL_SECS, MAX_SWEEP_INTERVAL_SECS);
    if clamped != secs {
        warn!(
            "SWEEP_INTERVAL_SECS={} out of range, using {} seconds",
            secs, clamped
        );
    }
    clamped
}

fn flag_var(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
