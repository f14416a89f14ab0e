//! Solar position engine for Ambient
//!
//! Pure astronomical approximation: elevation/azimuth of the sun for a
//! coordinate pair at a UTC instant, plus the categorical day-phase used
//! by the theming layer. No I/O, no hidden state.

pub mod phase;
pub mod position;
pub mod types;

pub use phase::{classify, Phase};
pub use position::{solar_position, timezone_offset_minutes};
pub use types::SolarPosition;
