//! Repository layer.
//!
//! The [`OrderRepository`] trait is the seam between business rules and
//! storage; `PgOrderRepository` is the Postgres implementation and the only
//! code in the workspace that issues queries.

pub mod order_item_repo;

pub use order_item_repo::{OrderRepository, PgOrderRepository};
