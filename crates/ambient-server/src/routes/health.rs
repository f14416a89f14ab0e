//! `GET /api/health` - liveness check. Never fails.

use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Ambient backend is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
