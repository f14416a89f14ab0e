//! `GET /api/weather` - current conditions via OpenWeatherMap.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;

use super::CoordsQuery;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn weather(
    State(state): State<AppState>,
    Query(query): Query<CoordsQuery>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let (lat, lng) = query.require()?;

    let client = state.weather.as_ref().ok_or_else(|| {
        ApiError::Configuration("OpenWeatherMap API key not configured".to_string())
    })?;

    let key = format!("weather_{lat}_{lng}");

    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(ApiResponse::ok(cached)));
    }

    let conditions = client.current(&lat, &lng).await.map_err(|err| {
        tracing::warn!(error = %err, "weather lookup failed");
        ApiError::Upstream("Failed to get weather data".to_string())
    })?;

    let data = serde_json::to_value(&conditions)
        .map_err(|_| ApiError::Internal("Failed to get weather data".to_string()))?;

    state.cache.set(&key, &data);

    Ok(Json(ApiResponse::ok(data)))
}
