//! Weather collaborator error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weather API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("unexpected weather payload: {0}")]
    Parse(String),
}
