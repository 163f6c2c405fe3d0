//! News Cache - WordPress posts proxy with an in-process TTL cache

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_cache::api::create_router;
use news_cache::{spawn_sweep_task, AppState, Config};

/// Main entry point for the posts proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and upstream client
/// 4. Start the background expiry sweep
/// 5. Serve the Axum router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "news_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting News Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, default_ttl={}ms, posts_ttl={}ms, port={}, sweep_interval={}s",
        config.max_entries,
        config.default_ttl_ms,
        config.posts_ttl_ms,
        config.server_port,
        config.sweep_interval
    );

    let state = AppState::from_config(&config).context("failed to build upstream client")?;
    match state.upstream.as_deref() {
        Some(client) => info!("WordPress upstream: {}", client.base_url()),
        None => warn!("WP_API_URL not set, /api/posts will return errors"),
    }

    if state.cache_admin {
        warn!("Cache admin routes enabled under /cache");
    }

    let sweep_handle = spawn_sweep_task(state.cache.clone(), config.sweep_interval());

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    sweep_handle.abort();
    warn!("Sweep task aborted");
}
