use serde::{Deserialize, Serialize};

/// Sun position in the observer's sky, degrees.
///
/// Elevation is the angle above the horizon in [-90, 90]; azimuth is the
/// compass bearing in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    pub elevation: f64,
    pub azimuth: f64,
}
