//! Shared per-request application state.

use std::sync::Arc;
use std::time::Duration;

use ambient_cache::CacheStore;
use ambient_core::Config;
use ambient_geo::GeoClient;
use ambient_weather::WeatherClient;
use anyhow::Context;

/// Everything the handlers need. Cheap to clone; the filesystem behind the
/// cache store is the only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<CacheStore>,
    pub geo: Arc<GeoClient>,
    /// Absent when no API key is configured; the weather route reports a
    /// configuration error in that case.
    pub weather: Option<Arc<WeatherClient>>,
}

impl AppState {
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let cache = CacheStore::new(
            &config.cache.directory,
            Duration::from_secs(config.cache.max_age_secs),
        )
        .context("failed to create cache store")?;

        let geo = GeoClient::new(
            &config.upstream.geolocation_base_url,
            Duration::from_secs(config.upstream.geolocation_timeout_secs),
        )
        .context("failed to build geolocation client")?;

        let weather = match &config.upstream.openweather_api_key {
            Some(key) => Some(Arc::new(
                WeatherClient::new(
                    &config.upstream.openweather_base_url,
                    key,
                    Duration::from_secs(config.upstream.openweather_timeout_secs),
                )
                .context("failed to build weather client")?,
            )),
            None => None,
        };

        Ok(Self {
            config: Arc::new(config),
            cache: Arc::new(cache),
            geo: Arc::new(geo),
            weather,
        })
    }
}
