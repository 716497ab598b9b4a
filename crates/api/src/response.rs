//! Shared response envelope types for API handlers.
//!
//! Mutating endpoints answer with a `{ "message": ..., "data": ... }`
//! envelope; list endpoints return the bare JSON payload the board client
//! renders from.

use serde::Serialize;

/// Standard `{ "message": ..., "data": T }` response envelope for
/// successful mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: &'static str,
    pub data: T,
}
