//! Elevation -> day-phase classification.

use serde::{Deserialize, Serialize};

/// Categorical day phase driving the theming layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Night,
    Twilight,
    Sunrise,
    Day,
    Noon,
    Sunset,
    Evening,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::Twilight => "twilight",
            Self::Sunrise => "sunrise",
            Self::Day => "day",
            Self::Noon => "noon",
            Self::Sunset => "sunset",
            Self::Evening => "evening",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a solar elevation (degrees) to a [`Phase`].
///
/// Upper-bound thresholds checked in order, first match wins. The table is
/// kept byte-for-byte compatible with the historical behavior: `day` is
/// reachable from two disjoint ranges, and anything that matches no bound
/// (including NaN) lands on `day`.
pub fn classify(elevation: f64) -> Phase {
    if elevation < -6.0 {
        Phase::Night
    } else if elevation < -3.0 {
        Phase::Twilight
    } else if elevation < 5.0 {
        Phase::Sunrise
    } else if elevation < 20.0 {
        Phase::Day
    } else if elevation < 45.0 {
        Phase::Noon
    } else if elevation < 70.0 {
        Phase::Sunset
    } else if elevation < 100.0 {
        Phase::Evening
    } else {
        Phase::Day
    }
}
