//! Integration Tests for the Posts Proxy
//!
//! Runs the router against a local fake WordPress server to exercise the
//! cache hit, refresh and stale-on-error paths end to end.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use news_cache::{api::create_router, upstream::WordPressClient, ApiCache, AppState};
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceExt;

// == Fake Upstream ==

#[derive(Default)]
struct Upstream {
    calls: AtomicUsize,
    failing: AtomicBool,
}

#[derive(Deserialize)]
struct UpstreamQuery {
    per_page: usize,
    category_name: Option<String>,
}

async fn fake_posts(
    State(upstream): State<Arc<Upstream>>,
    Query(query): Query<UpstreamQuery>,
) -> Response {
    let call = upstream.calls.fetch_add(1, Ordering::SeqCst) + 1;
    if upstream.failing.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let posts: Vec<Value> = (0..query.per_page)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Post {}", id),
                "category": query.category_name,
                "call": call,
            })
        })
        .collect();
    Json(posts).into_response()
}

async fn spawn_upstream() -> (SocketAddr, Arc<Upstream>) {
    let upstream = Arc::new(Upstream::default());
    let app = Router::new()
        .route("/wp/posts", get(fake_posts))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, upstream)
}

// == Helper Functions ==

async fn create_test_app(posts_ttl: Duration) -> (Router, Arc<Upstream>) {
    let (addr, upstream) = spawn_upstream().await;
    let client = WordPressClient::new(format!("http://{}/wp", addr), Duration::from_secs(5)).unwrap();
    let state = AppState::new(
        ApiCache::new(50, Duration::from_secs(300)),
        Some(client),
        posts_ttl,
    )
    .with_cache_admin(true);
    (create_router(state), upstream)
}

async fn get_path(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn x_cache(response: &Response) -> &str {
    response.headers()["x-cache"].to_str().unwrap()
}

// == Posts Tests ==

#[tokio::test]
async fn test_posts_miss_then_hit() {
    let (app, upstream) = create_test_app(Duration::from_secs(180)).await;

    let first = get_path(&app, "/api/posts?per_page=3").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(x_cache(&first), "miss");
    let first_body = body_to_json(first.into_body()).await;
    assert_eq!(first_body.as_array().unwrap().len(), 3);

    let second = get_path(&app, "/api/posts?per_page=3").await;
    assert_eq!(x_cache(&second), "hit");
    assert_eq!(body_to_json(second.into_body()).await, first_body);

    assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_distinct_parameters_use_distinct_keys() {
    let (app, upstream) = create_test_app(Duration::from_secs(180)).await;

    get_path(&app, "/api/posts").await;
    get_path(&app, "/api/posts?per_page=2").await;
    let response = get_path(&app, "/api/posts?per_page=2&category_name=world").await;
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body[0]["category"], "world");

    assert_eq!(upstream.calls.load(Ordering::SeqCst), 3);

    let keys = body_to_json(get_path(&app, "/cache/keys").await.into_body()).await;
    assert_eq!(keys["keys"], json!(["posts-6", "posts-2", "posts-2-world"]));
    assert_eq!(keys["count"], 3);
}

#[tokio::test]
async fn test_refresh_bypasses_cache() {
    let (app, upstream) = create_test_app(Duration::from_secs(180)).await;

    get_path(&app, "/api/posts?per_page=1").await;
    let refreshed = get_path(&app, "/api/posts?per_page=1&refresh=true").await;

    assert_eq!(x_cache(&refreshed), "miss");
    let body = body_to_json(refreshed.into_body()).await;
    assert_eq!(body[0]["call"], 2);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_upstream_failure_serves_stale_listing() {
    let (app, upstream) = create_test_app(Duration::from_millis(50)).await;

    let fresh = get_path(&app, "/api/posts?per_page=2").await;
    let fresh_body = body_to_json(fresh.into_body()).await;

    tokio::time::sleep(Duration::from_millis(80)).await;
    upstream.failing.store(true, Ordering::SeqCst);

    let stale = get_path(&app, "/api/posts?per_page=2").await;
    assert_eq!(stale.status(), StatusCode::OK);
    assert_eq!(x_cache(&stale), "stale");
    assert_eq!(body_to_json(stale.into_body()).await, fresh_body);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_upstream_failure_without_cache_propagates_status() {
    let (app, upstream) = create_test_app(Duration::from_secs(180)).await;
    upstream.failing.store(true, Ordering::SeqCst);

    let response = get_path(&app, "/api/posts?per_page=2").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "WordPress API error: 503");

    let keys = body_to_json(get_path(&app, "/cache/keys").await.into_body()).await;
    assert_eq!(keys["count"], 0);
}

#[tokio::test]
async fn test_unreachable_upstream_returns_generic_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = WordPressClient::new(format!("http://{}/wp", addr), Duration::from_secs(2)).unwrap();
    let state = AppState::new(
        ApiCache::new(50, Duration::from_secs(300)),
        Some(client),
        Duration::from_secs(180),
    );
    let app = create_router(state);

    let response = get_path(&app, "/api/posts?per_page=2").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Failed to fetch posts");
    assert!(!json["error"].as_str().unwrap().contains(&addr.to_string()));
}

#[tokio::test]
async fn test_cache_routes_disabled_by_default() {
    let (addr, _upstream) = spawn_upstream().await;
    let client = WordPressClient::new(format!("http://{}/wp", addr), Duration::from_secs(5)).unwrap();
    let state = AppState::new(
        ApiCache::new(50, Duration::from_secs(300)),
        Some(client),
        Duration::from_secs(180),
    );
    let app = create_router(state);

    get_path(&app, "/api/posts?per_page=1").await;

    let cleared = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(cleared.status(), StatusCode::NOT_FOUND);

    // Listing is still cached
    let response = get_path(&app, "/api/posts?per_page=1").await;
    assert_eq!(x_cache(&response), "hit");
}

#[tokio::test]
async fn test_invalid_per_page_rejected() {
    let (app, upstream) = create_test_app(Duration::from_secs(180)).await;

    let response = get_path(&app, "/api/posts?per_page=500").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
}

// == Cache Management Tests ==

#[tokio::test]
async fn test_cache_management_endpoints() {
    let (app, upstream) = create_test_app(Duration::from_secs(180)).await;

    get_path(&app, "/api/posts?per_page=1").await;
    get_path(&app, "/api/posts?per_page=1").await;

    let has = body_to_json(get_path(&app, "/cache/has/posts-1").await.into_body()).await;
    assert_eq!(has["present"], true);

    let stats = body_to_json(get_path(&app, "/cache/stats").await.into_body()).await;
    assert_eq!(stats["size"], 1);
    assert_eq!(stats["capacity"], 50);
    assert_eq!(stats["default_ttl_ms"], 300_000);
    assert_eq!(stats["hits"], 1);

    let deleted = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cache/posts-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_to_json(deleted.into_body()).await["removed"], true);

    // Deleted key must be refetched
    get_path(&app, "/api/posts?per_page=1").await;
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 2);

    let cleared = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_to_json(cleared.into_body()).await["cleared"], 1);

    let has = body_to_json(get_path(&app, "/cache/has/posts-1").await.into_body()).await;
    assert_eq!(has["present"], false);
}

#[tokio::test]
async fn test_sweep_endpoint_removes_expired() {
    let (app, _upstream) = create_test_app(Duration::from_millis(30)).await;

    get_path(&app, "/api/posts?per_page=1").await;
    get_path(&app, "/api/posts?per_page=2").await;
    tokio::time::sleep(Duration::from_millis(60)).await;

    let swept = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/sweep")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(swept.status(), StatusCode::OK);
    assert_eq!(body_to_json(swept.into_body()).await["removed"], 2);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _upstream) = create_test_app(Duration::from_secs(180)).await;

    let response = get_path(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}
