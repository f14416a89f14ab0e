//! IP-geolocation collaborator for Ambient
//!
//! Thin client for the ip-api.com JSON endpoint. Lookups are fail-open:
//! any transport, status, or decode problem yields `None` and the caller
//! substitutes the fixed fallback location, so this endpoint can never
//! error toward the front end.

pub mod client;
pub mod types;

pub use client::GeoClient;
pub use types::Location;
