use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the pool hands out request-scoped connections that are
/// released on every exit path. No other state persists across requests --
/// the table is the single source of truth.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: comanda_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
