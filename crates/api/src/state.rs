use std::sync::Arc;

use imovia_engine::{PgStore, TransitionController};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: imovia_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The board's write path: drag lifecycle and automation.
    pub controller: Arc<TransitionController<PgStore>>,
}

impl AppState {
    pub fn new(pool: imovia_db::DbPool, config: ServerConfig) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            controller: Arc::new(TransitionController::new(store)),
        }
    }
}
