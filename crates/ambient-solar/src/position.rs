//! Low-precision solar position approximation.
//!
//! Multi-step ephemeris approximation (Julian day -> mean elements ->
//! equation of center -> apparent longitude -> equatorial coordinates ->
//! hour angle -> horizontal coordinates). Accurate to a fraction of a
//! degree for contemporary dates, which is plenty for theming; it ignores
//! leap seconds, nutation beyond a single term, and atmospheric refraction.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::types::SolarPosition;

const J2000_EPOCH: f64 = 2451545.0;
const DAYS_PER_CENTURY: f64 = 36525.0;

fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Julian day number for a UTC instant, with fractional day from
/// hour/minute. Seconds are deliberately ignored.
pub fn julian_day(at: &DateTime<Utc>) -> f64 {
    let year = f64::from(at.year());
    let month = f64::from(at.month());
    let day = f64::from(at.day());
    let hour = f64::from(at.hour());
    let minute = f64::from(at.minute());

    367.0 * year - (7.0 * (year + ((month + 9.0) / 12.0).floor()) / 4.0).floor()
        + (275.0 * month / 9.0).floor()
        + day
        + 1721013.5
        + (hour + minute / 60.0) / 24.0
}

/// Crude timezone offset estimate in minutes, derived purely from
/// longitude (15 degrees per hour). Not DST- or border-aware.
pub fn timezone_offset_minutes(lng: f64) -> i32 {
    (lng / 15.0).round() as i32 * 60
}

/// Compute the sun's elevation and azimuth (degrees) for `lat`/`lng` at a
/// UTC instant. Deterministic for identical inputs.
///
/// Inputs to `asin`/`acos` are clamped and the degenerate azimuth at the
/// poles or at elevation +/-90 (where the bearing is undefined) is pinned
/// to 0.0, so out-of-range coordinates degrade instead of producing NaN.
pub fn solar_position(lat: f64, lng: f64, at: &DateTime<Utc>) -> SolarPosition {
    let lat_rad = lat.to_radians();

    let jd = julian_day(at);
    // Centuries since J2000.0
    let t = (jd - J2000_EPOCH) / DAYS_PER_CENTURY;

    // Mean longitude of the sun
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t * t;

    // Mean anomaly of the sun
    let m = 357.52910 + 35999.05030 * t - 0.0001559 * t * t - 0.00000048 * t * t * t;

    // Equation of center
    let c = (1.914600 - 0.004817 * t - 0.000014 * t * t) * m.to_radians().sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m.to_radians()).sin()
        + 0.000290 * (3.0 * m.to_radians()).sin();

    // True longitude, corrected to apparent longitude by a single
    // nutation term
    let l = l0 + c;
    let omega = 125.04 - 1934.136 * t;
    let lambda = l - 0.00569 - 0.00478 * omega.to_radians().sin();

    // Obliquity of the ecliptic
    let epsilon = 23.439 - 0.0000004 * t;

    // Right ascension and declination
    let alpha = (epsilon.to_radians().cos() * lambda.to_radians().sin())
        .atan2(lambda.to_radians().cos())
        .to_degrees();
    let delta = (epsilon.to_radians().sin() * lambda.to_radians().sin())
        .asin()
        .to_degrees();

    // Local sidereal time
    let lst = 280.46061837
        + 360.98564736629 * (jd - J2000_EPOCH)
        + 0.000387933 * t * t
        - t * t * t / 38710000.0
        + lng;

    // Hour angle, brought into [0, 360]
    let mut ha = lst - alpha;
    while ha < 0.0 {
        ha += 360.0;
    }
    while ha > 360.0 {
        ha -= 360.0;
    }

    let ha_rad = ha.to_radians();
    let delta_rad = delta.to_radians();

    let sin_el = (lat_rad.sin() * delta_rad.sin()
        + lat_rad.cos() * delta_rad.cos() * ha_rad.cos())
    .clamp(-1.0, 1.0);
    let elevation = sin_el.asin().to_degrees();

    // cos(lat) * cos(elevation) is zero at the poles and at the zenith;
    // the bearing is undefined there and pinned to 0.0
    let cos_az = (delta_rad.sin() - lat_rad.sin() * sin_el) / (lat_rad.cos() * sin_el.asin().cos());
    let azimuth = if cos_az.is_finite() {
        cos_az.clamp(-1.0, 1.0).acos().to_degrees()
    } else {
        0.0
    };

    // Hemisphere correction: mirror the bearing for the afternoon half
    let azimuth = if ha > 180.0 { 360.0 - azimuth } else { azimuth };

    SolarPosition {
        elevation,
        azimuth: normalize_angle(azimuth),
    }
}
