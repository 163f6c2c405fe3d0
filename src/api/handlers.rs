//! API Handlers
//!
//! HTTP request handlers for the posts proxy and the cache management endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{error, warn};

use crate::cache::{ApiCache, CacheOptions};
use crate::config::Config;
use crate::error::{AppError, Result, UpstreamError};
use crate::models::{
    ClearResponse, DeleteResponse, HasResponse, HealthResponse, KeysResponse, PostsQuery,
    StatsResponse, SweepResponse,
};
use crate::upstream::WordPressClient;

/// Header reporting whether a listing came from cache (`hit`, `miss` or `stale`)
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Cached post listings, keyed by query parameters.
pub type PostsCache = ApiCache<Vec<Value>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Post listing cache
    pub cache: PostsCache,
    /// Upstream client, absent when no WordPress URL is configured
    pub upstream: Option<Arc<WordPressClient>>,
    /// TTL applied to cached listings
    pub posts_ttl: Duration,
    /// Whether `/cache/*` management routes are mounted
    pub cache_admin: bool,
}

impl AppState {
    /// Creates a new AppState with the given cache and upstream.
    pub fn new(cache: PostsCache, upstream: Option<WordPressClient>, posts_ttl: Duration) -> Self {
        Self {
            cache,
            upstream: upstream.map(Arc::new),
            posts_ttl,
            cache_admin: false,
        }
    }

    /// Enables or disables the cache management routes.
    pub fn with_cache_admin(mut self, enabled: bool) -> Self {
        self.cache_admin = enabled;
        self
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let cache = ApiCache::new(config.max_entries, config.default_ttl());
        let upstream = WordPressClient::from_config(config)?;
        Ok(Self::new(cache, upstream, config.posts_ttl())
            .with_cache_admin(config.cache_admin_enabled))
    }
}

/// Handler for GET /api/posts
///
/// Serves the post listing for `per_page`/`category_name` through the cache.
/// When the upstream fails and an older listing is stored, that listing is
/// returned with `x-cache: stale`.
pub async fn posts_handler(
    State(state): State<AppState>,
    Query(query): Query<PostsQuery>,
) -> Result<Response> {
    if let Some(error_msg) = query.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let client = state.upstream.as_ref().ok_or(AppError::NotConfigured)?;

    let key = query.cache_key();
    let options = CacheOptions::with_ttl(state.posts_ttl).force_refresh(query.refresh);

    let cached = state
        .cache
        .with_cache(
            &key,
            || client.fetch_posts(query.per_page(), query.category()),
            options,
        )
        .await
        .map_err(|err| {
            error!("Error fetching posts from WordPress: {:?}", err);
            AppError::Upstream(err)
        })?;

    if cached.is_stale() {
        warn!("Serving stale posts for key: {}", key);
    }

    let freshness = HeaderValue::from_static(cached.freshness.as_str());
    Ok(([(X_CACHE, freshness)], Json(cached.value)).into_response())
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.cache.stats().await))
}

/// Handler for GET /cache/keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    Json(KeysResponse::new(state.cache.keys().await))
}

/// Handler for GET /cache/has/:key
///
/// Purges the entry as a side effect when it has expired.
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let present = state.cache.has(&key).await;
    Json(HasResponse { key, present })
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let removed = state.cache.clear(&key).await;
    Json(DeleteResponse { key, removed })
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.clear_all().await;
    Json(ClearResponse { cleared })
}

/// Handler for POST /cache/sweep
pub async fn sweep_handler(State(state): State<AppState>) -> Json<SweepResponse> {
    let removed = state.cache.clear_expired().await;
    Json(SweepResponse { removed })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
