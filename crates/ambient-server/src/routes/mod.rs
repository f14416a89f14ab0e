//! Route wiring, CORS, and static file serving.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use ambient_core::CorsConfig;

use crate::error::ApiError;
use crate::state::AppState;

pub mod health;
pub mod locate;
pub mod sun;
pub mod weather;

/// `lat`/`lng` query pair shared by the sun and weather routes. Kept as
/// raw strings: the values participate in cache keys exactly as the
/// caller sent them.
#[derive(Debug, Deserialize)]
pub struct CoordsQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl CoordsQuery {
    /// Both parameters present and non-empty, or a 400.
    pub fn require(self) -> Result<(String, String), ApiError> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if !lat.is_empty() && !lng.is_empty() => Ok((lat, lng)),
            _ => Err(ApiError::Validation(
                "Latitude and longitude required".to_string(),
            )),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/api/sun", get(sun::sun))
        .route("/api/weather", get(weather::weather))
        .route("/api/locate", get(locate::locate))
        .route("/api/health", get(health::health))
        .with_state(state.clone());

    // Serve the front-end assets next to the API when configured
    if let Some(dir) = &state.config.server.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.cors))
}

/// Permissive CORS when no origins are configured, restricted otherwise.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .max_age(Duration::from_secs(config.max_age_secs));

    if config.origins.is_empty() {
        tracing::info!("CORS: allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        tracing::info!(origins = ?config.origins, "CORS: restricting origins");
        let origins: Vec<HeaderValue> = config
            .origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        let cors = cors
            .allow_origin(origins)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
        if config.allow_credentials {
            cors.allow_credentials(true)
        } else {
            cors
        }
    }
}
