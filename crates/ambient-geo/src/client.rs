//! ip-api.com lookup client.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::types::Location;

const DEFAULT_BASE_URL: &str = "http://ip-api.com/json";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// ip-api.com response. The service reports failures (reserved ranges,
/// unknown addresses) in-band via `status`, with the data fields absent.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    country: Option<String>,
    timezone: Option<String>,
}

/// Client for the IP-geolocation collaborator.
#[derive(Debug, Clone)]
pub struct GeoClient {
    client: Client,
    base_url: String,
}

impl GeoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Resolve `ip` to an approximate location. Returns `None` on any
    /// failure or timeout; the caller falls back to [`Location::fallback`].
    pub async fn locate(&self, ip: &str) -> Option<Location> {
        let url = format!("{}/{}", self.base_url, ip);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(err) => {
                tracing::debug!(ip, error = %err, "geolocation request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(ip, status = %response.status(), "geolocation returned non-success status");
            return None;
        }

        let body: IpApiResponse = match response.json().await {
            Ok(b) => b,
            Err(err) => {
                tracing::debug!(ip, error = %err, "geolocation parse error");
                return None;
            }
        };

        if body.status != "success" {
            tracing::debug!(ip, status = %body.status, "geolocation lookup unsuccessful");
            return None;
        }

        Some(Location {
            latitude: body.lat?,
            longitude: body.lon?,
            city: body.city?,
            country: body.country?,
            timezone: body.timezone?,
        })
    }
}
