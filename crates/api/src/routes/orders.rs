//! Route definitions for the order board.
//!
//! Mounted at `/orders` by `api_routes()`. Methods outside GET/POST get a
//! 405 with the `Allow` header from axum's method router.
//!
//! ```text
//! GET  /    -> list_orders (?mode=board|history, ?stats=1, ?group=ticket)
//! POST /    -> submit_order (status change or creation, by body shape)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(orders::list_orders).post(orders::submit_order))
}
