//! HTTP surface for Ambient
//!
//! Wires the cache, solar engine, and upstream collaborators into the
//! `/api/*` routes consumed by the front-end theming layer. Every
//! per-request failure is converted into the `{success, data?, error?}`
//! envelope at this boundary; nothing is allowed to take the process down.

pub mod error;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use response::ApiResponse;
pub use routes::router;
pub use state::AppState;
