//! `GET /api/locate` - approximate location from the client IP.
//!
//! This route never fails toward the client: when the geolocation
//! collaborator is unreachable or reports failure, the fixed fallback
//! location is served (and deliberately not cached, so a later lookup can
//! still succeed).

use axum::extract::{ConnectInfo, State};
use axum::Json;
use serde_json::Value;
use std::net::SocketAddr;

use ambient_geo::Location;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn locate(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let ip = addr.ip().to_string();
    let key = format!("locate_{ip}");

    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(ApiResponse::ok(cached)));
    }

    let location = match state.geo.locate(&ip).await {
        Some(location) => {
            let data = to_value(&location)?;
            state.cache.set(&key, &data);
            data
        }
        None => {
            tracing::debug!(%ip, "geolocation unavailable, serving fallback location");
            to_value(&Location::fallback())?
        }
    };

    Ok(Json(ApiResponse::ok(location)))
}

fn to_value(location: &Location) -> Result<Value, ApiError> {
    serde_json::to_value(location)
        .map_err(|_| ApiError::Internal("Failed to get location".to_string()))
}
