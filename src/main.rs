//! Podsite API - Read-only REST API for a podcast website
//!
//! Binary entry point and composition root.

use std::future::IntoFuture;
use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use podsite_api::{create_router, AppState, Config, SweepTask};

/// Main entry point for the Podsite API server.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Load episode and page content (falling back to built-in content)
/// 4. Start background sweeps for the response cache and rate limiter
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM, bounded by the shutdown timeout
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    info!("Starting Podsite API server");
    info!(
        "Configuration loaded: env={}, port={}, cache_ttl={}s, rate_limit={}/{}s, content_dir={}",
        config.environment,
        config.server_port,
        config.cache_ttl,
        config.rate_limit,
        config.rate_limit_window,
        config.content_dir.display()
    );

    // Create application state with content, cache and rate limiter
    let state = AppState::from_config(&config);
    info!("Serving {} episodes", state.episodes.len());

    let sweepers = state.spawn_sweepers(&config);
    info!("Background sweep tasks started");

    let app = create_router(state, &config.cors_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.cancel();
        }
    });

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown.clone().cancelled_owned())
    .into_future();

    // In-flight requests get a bounded grace period once a signal arrives
    let shutdown_timeout = config.shutdown_timeout();
    let deadline = async {
        shutdown.cancelled().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server => result.context("server error")?,
        _ = deadline => {
            warn!("Graceful shutdown exceeded {:?}, dropping open connections", shutdown_timeout);
        }
    }

    stop_sweepers(sweepers).await;
    info!("Server shutdown complete");
    Ok(())
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the configured log level applies to
/// this crate and tower-http. Production logs are JSON lines.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "podsite_api={level},tower_http={level}",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn stop_sweepers(sweepers: Vec<SweepTask>) {
    for sweeper in sweepers {
        sweeper.shutdown().await;
    }
    info!("Background sweep tasks stopped");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
