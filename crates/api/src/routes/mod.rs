pub mod health;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /orders        GET  list (board | history | grouped | stats)
/// /orders        POST status change or creation
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/orders", orders::router())
}
