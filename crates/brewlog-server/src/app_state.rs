// ABOUTME: Shared application state for the brewlog HTTP server.
// ABOUTME: Holds the config and database, and runs record-service calls on per-request sessions.

use std::sync::Arc;

use brewlog_core::BrewService;
use brewlog_store::{BrewSession, Database, StoreError};

use crate::config::BrewlogConfig;
use crate::error::ApiError;

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub config: BrewlogConfig,
    pub db: Database,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: BrewlogConfig, db: Database) -> Self {
        Self { config, db }
    }

    /// Run `op` against a fresh storage session on the blocking pool.
    /// The session is dropped before this returns, on success or failure.
    pub async fn with_service<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&BrewService<BrewSession>) -> Result<T, StoreError> + Send + 'static,
    {
        let db = self.db.clone();
        let result = tokio::task::spawn_blocking(move || {
            let service = BrewService::new(db.session()?);
            op(&service)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("storage task failed: {e}")))?;

        result.map_err(ApiError::Storage)
    }
}
