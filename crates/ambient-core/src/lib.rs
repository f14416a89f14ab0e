//! Core configuration and bootstrap for Ambient.

pub mod config;

pub use config::{
    CacheConfig, Config, ConfigError, CorsConfig, ServerConfig, UpstreamConfig, ValidationResult,
};

/// Initialize tracing/logging. Call once at process start.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("ambient core initialized");
}
