//! OpenWeatherMap current-weather client.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::CurrentConditions;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Upstream payload, nested the way OpenWeatherMap ships it.

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    clouds: OwmClouds,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: f64,
}

/// Client for the OpenWeatherMap collaborator. Holds the API key; whether
/// a key is configured at all is decided upstream in the handler layer.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn with_defaults(api_key: &str) -> Result<Self, reqwest::Error> {
        Self::new(
            DEFAULT_BASE_URL,
            api_key,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Fetch current conditions for a coordinate pair. `lat`/`lng` are
    /// passed through as the caller supplied them; the upstream service
    /// does its own validation.
    #[instrument(skip(self), level = "info")]
    pub async fn current(&self, lat: &str, lng: &str) -> Result<CurrentConditions, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat),
                ("lon", lng),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: OwmResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let conditions = payload
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("empty weather conditions list".to_string()))?;

        Ok(CurrentConditions {
            temp: payload.main.temp,
            humidity: payload.main.humidity,
            pressure: payload.main.pressure,
            clouds: payload.clouds.all,
            description: conditions.description,
            icon: conditions.icon,
            wind_speed: payload.wind.speed,
            wind_deg: payload.wind.deg,
        })
    }
}
