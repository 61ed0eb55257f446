// ABOUTME: HTTP server for brewlog, exposing brew CRUD over a versioned REST API.
// ABOUTME: Uses Axum with shared state holding the configuration and the brew database.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{BrewlogConfig, ConfigError};
pub use error::ApiError;
pub use routes::create_router;
