//! API Routes
//!
//! Configures the Axum router with the posts proxy and cache endpoints.

use axum::{
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_handler, has_handler, health_handler, keys_handler, posts_handler,
    stats_handler, sweep_handler, AppState,
};

/// Creates the main router.
///
/// The `/cache/*` management routes are only mounted when
/// `state.cache_admin` is set; otherwise they answer 404.
///
/// # Middleware
/// - CORS: Any origin, `GET` only, `Content-Type` header, for browser clients of `/api/posts`
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    let mut router = Router::new()
        .route("/api/posts", get(posts_handler))
        .route("/health", get(health_handler));

    if state.cache_admin {
        router = router.merge(cache_admin_router());
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Cache management routes, for operators only.
fn cache_admin_router() -> Router<AppState> {
    Router::new()
        .route("/cache", delete(clear_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/keys", get(keys_handler))
        .route("/cache/sweep", post(sweep_handler))
        .route("/cache/has/:key", get(has_handler))
        .route("/cache/:key", delete(delete_handler))
}
