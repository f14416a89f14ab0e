//! Ambient backend entry point.
//!
//! Bootstraps configuration, the cache store and its cleanup task, and the
//! Axum HTTP server. Ctrl-C stops the server and cancels the sweep.

use std::net::SocketAddr;
use std::time::Duration;

use ambient_cache::CleanupScheduler;
use ambient_core::Config;
use ambient_server::{router, AppState};
use anyhow::Context;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ambient_core::init();

    let config = Config::load().context("failed to load configuration")?;
    let validation = config.validate();
    if !validation.is_valid() {
        anyhow::bail!("configuration invalid: {}", validation.error_summary());
    }
    for (field, message) in &validation.warnings {
        tracing::warn!(%field, %message, "config warning");
    }

    let state = AppState::from_config(config).context("failed to initialize application state")?;

    let shutdown = CancellationToken::new();
    let sweeper = CleanupScheduler::new(
        state.config.cache.directory.clone(),
        Duration::from_secs(state.config.cache.max_age_secs),
        Duration::from_secs(state.config.cache.cleanup_interval_secs),
    );
    let sweep_handle = sweeper.spawn(shutdown.clone());

    let app = router(state.clone());

    let addr: SocketAddr = format!("{}:{}", state.config.server.host, state.config.server.port)
        .parse()
        .context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, cache_dir = %state.config.cache.directory.display(), "ambient backend listening");

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    );

    tokio::select! {
        result = server => {
            result.context("server error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    shutdown.cancel();
    let _ = sweep_handle.await;

    Ok(())
}
