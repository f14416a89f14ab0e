//! Configuration loading and validation.
//!
//! Sources, in order: an optional TOML file (`AMBIENT_CONFIG`, default
//! `ambient.toml`), then environment overrides for deployment knobs
//! (`PORT`, `HOST`, `CACHE_DIR`, `CACHE_DURATION`, `OPENWEATHER_API_KEY`,
//! `CORS_ORIGINS`, `STATIC_DIR`). Everything is fixed at process start;
//! nothing is mutable at runtime.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration validation errors/warnings, keyed by field path.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<(String, String)>,
    pub warnings: Vec<(String, String)>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push((field.into(), message.into()));
    }

    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of front-end assets to serve alongside the API, if any
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. Empty means allow all (development mode).
    #[serde(default)]
    pub origins: Vec<String>,

    #[serde(default)]
    pub allow_credentials: bool,

    /// Preflight cache duration in seconds
    #[serde(default = "default_cors_max_age")]
    pub max_age_secs: u64,
}

fn default_cors_max_age() -> u64 {
    86400
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: Vec::new(),
            allow_credentials: false,
            max_age_secs: default_cors_max_age(),
        }
    }
}

/// Cache tuning.
///
/// `max_age_secs` is the single TTL the store enforces for every key.
/// The per-domain freshness windows (5 minutes for sun positions, 30 for
/// weather, 60 for locations) are call-site conventions: the sun lookup
/// quantizes its key by a 5-minute time bucket, while weather and location
/// entries simply live out the global TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_dir")]
    pub directory: PathBuf,

    /// Global TTL in seconds for every cache entry
    #[serde(default = "default_cache_max_age")]
    pub max_age_secs: u64,

    /// How often the background sweep runs, in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./cache")
}

fn default_cache_max_age() -> u64 {
    3600
}

fn default_cleanup_interval() -> u64 {
    3600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: default_cache_dir(),
            max_age_secs: default_cache_max_age(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_openweather_base_url")]
    pub openweather_base_url: String,

    /// OpenWeatherMap API key. Usually supplied via `OPENWEATHER_API_KEY`;
    /// without it the weather endpoint answers with a configuration error.
    #[serde(default)]
    pub openweather_api_key: Option<String>,

    #[serde(default = "default_openweather_timeout")]
    pub openweather_timeout_secs: u64,

    #[serde(default = "default_geolocation_base_url")]
    pub geolocation_base_url: String,

    #[serde(default = "default_geolocation_timeout")]
    pub geolocation_timeout_secs: u64,
}

fn default_openweather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_openweather_timeout() -> u64 {
    10
}

fn default_geolocation_base_url() -> String {
    "http://ip-api.com/json".to_string()
}

fn default_geolocation_timeout() -> u64 {
    5
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            openweather_base_url: default_openweather_base_url(),
            openweather_api_key: None,
            openweather_timeout_secs: default_openweather_timeout(),
            geolocation_base_url: default_geolocation_base_url(),
            geolocation_timeout_secs: default_geolocation_timeout(),
        }
    }
}

impl Config {
    /// Load configuration: TOML file if present, then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("AMBIENT_CONFIG").unwrap_or_else(|_| "ambient.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let contents = std::fs::read_to_string(&path)?;
            Self::from_toml_str(&contents)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(%port, "ignoring unparseable PORT override"),
            }
        }
        if let Ok(dir) = std::env::var("CACHE_DIR") {
            self.cache.directory = PathBuf::from(dir);
        }
        if let Ok(secs) = std::env::var("CACHE_DURATION") {
            match secs.parse() {
                Ok(secs) => self.cache.max_age_secs = secs,
                Err(_) => tracing::warn!(%secs, "ignoring unparseable CACHE_DURATION override"),
            }
        }
        if let Ok(key) = std::env::var("OPENWEATHER_API_KEY") {
            if !key.is_empty() {
                self.upstream.openweather_api_key = Some(key);
            }
        }
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            self.cors.origins = parse_origins(&origins);
        }
        if let Ok(dir) = std::env::var("STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }
    }

    /// Validate the configuration, returning errors and warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.cache.max_age_secs == 0 {
            result.add_error(
                "cache.max_age_secs",
                "TTL of 0 would expire every entry immediately",
            );
        }
        if self.cache.cleanup_interval_secs == 0 {
            result.add_error("cache.cleanup_interval_secs", "sweep interval must be > 0");
        }

        for (field, url) in [
            ("upstream.openweather_base_url", &self.upstream.openweather_base_url),
            ("upstream.geolocation_base_url", &self.upstream.geolocation_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                result.add_error(field, format!("must be an http(s) URL, got: {url}"));
            }
        }

        if self.upstream.openweather_api_key.is_none() {
            result.add_warning(
                "upstream.openweather_api_key",
                "not configured - /api/weather will return errors",
            );
        }

        if let Some(dir) = &self.server.static_dir {
            if !dir.is_dir() {
                result.add_warning(
                    "server.static_dir",
                    format!("directory does not exist: {}", dir.display()),
                );
            }
        }

        result
    }
}

/// Split a comma-separated origin list, dropping empty segments.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
