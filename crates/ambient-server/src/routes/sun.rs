//! `GET /api/sun` - solar position and day phase.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

use ambient_solar::{classify, solar_position};

use super::CoordsQuery;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Quantization bucket for the cache key: entries made within the same
/// 5-minute window share a key, which is what bounds their freshness
/// despite the store's longer global TTL.
const SUN_KEY_BUCKET_SECS: u64 = 300;

pub async fn sun(
    State(state): State<AppState>,
    Query(query): Query<CoordsQuery>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let (lat_raw, lng_raw) = query.require()?;

    let bucket = epoch_secs() / SUN_KEY_BUCKET_SECS;
    let key = format!("sun_{lat_raw}_{lng_raw}_{bucket}");

    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(ApiResponse::ok(cached)));
    }

    let lat: f64 = lat_raw
        .parse()
        .map_err(|_| ApiError::Validation("Latitude and longitude required".to_string()))?;
    let lng: f64 = lng_raw
        .parse()
        .map_err(|_| ApiError::Validation("Latitude and longitude required".to_string()))?;

    let now = Utc::now();
    let position = solar_position(lat, lng, &now);
    let phase = classify(position.elevation);

    let data = serde_json::json!({
        "elevation": position.elevation,
        "azimuth": position.azimuth,
        "phase": phase,
        "timestamp": now.timestamp_millis(),
    });

    state.cache.set(&key, &data);

    Ok(Json(ApiResponse::ok(data)))
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
