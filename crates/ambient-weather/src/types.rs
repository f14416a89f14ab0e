use serde::{Deserialize, Serialize};

/// Flat current-weather record served to the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub clouds: f64,
    pub description: String,
    pub icon: String,
    pub wind_speed: f64,
    pub wind_deg: f64,
}
