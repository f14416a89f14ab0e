use serde::{Deserialize, Serialize};

/// Resolved approximate location for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub country: String,
    pub timezone: String,
}

impl Location {
    /// Fixed default used whenever geolocation fails.
    pub fn fallback() -> Self {
        Self {
            latitude: 40.7128,
            longitude: -74.0060,
            city: "New York".to_string(),
            country: "US".to_string(),
            timezone: "America/New_York".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_new_york() {
        let loc = Location::fallback();
        assert_eq!(loc.latitude, 40.7128);
        assert_eq!(loc.longitude, -74.0060);
        assert_eq!(loc.city, "New York");
        assert_eq!(loc.country, "US");
        assert_eq!(loc.timezone, "America/New_York");
    }
}
