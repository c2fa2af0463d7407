//! Wakademy Cache - content cache service
//!
//! Fronts the Wakademy content API with a TTL cache and a background
//! preloader.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wakademy_cache::api::create_router;
use wakademy_cache::{spawn_cleanup_task, AppState, Config};

/// Main entry point for the content cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the content cache, transport and preloader
/// 4. Start background TTL cleanup task (if enabled)
/// 5. Queue the essential preload set (if enabled)
/// 6. Start HTTP server on configured port
/// 7. On SIGINT/SIGTERM stop the sweep and let the preloader drain
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wakademy_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Wakademy content cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: api_base_url={}, port={}, cleanup_interval={}s, sweep_enabled={}",
        config.api_base_url, config.server_port, config.cleanup_interval, config.sweep_enabled
    );

    let state = AppState::from_config(&config).context("failed to build application state")?;
    info!("Content cache initialized");

    let cleanup_handle = config.sweep_enabled.then(|| {
        info!("Background cleanup task started");
        spawn_cleanup_task(state.content.cache().clone(), config.cleanup_interval())
    });

    if config.preload_on_startup {
        let queued = state.preloader.preload_essential_content();
        info!("Queued {} essential preload tasks", queued);
    }

    let preloader = state.preloader.clone();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }

    if tokio::time::timeout(config.shutdown_grace(), preloader.wait_idle())
        .await
        .is_err()
    {
        warn!("Preloader still busy after grace period, abandoning queue");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
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
}
