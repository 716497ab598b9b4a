//! Domain error taxonomy for order operations.
//!
//! Validation errors are raised before any storage mutation is attempted;
//! `UpdateFailed`/`CreateFailed` wrap storage operations that reported
//! failure after validation passed.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// The target status is not in the fixed enumeration.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// The ticket id has no items.
    #[error("Ticket not found: {0}")]
    NotFound(String),

    /// A required creation field is absent or empty. Carries the wire
    /// name of the first missing field.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The storage layer reported failure while applying a status change.
    #[error("Failed to update order")]
    UpdateFailed,

    /// The storage layer reported failure while inserting a new item.
    #[error("Failed to create order")]
    CreateFailed,
}
