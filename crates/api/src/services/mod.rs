//! Business rules layer.
//!
//! Services validate before any storage mutation is attempted (fail fast,
//! no partial writes) and talk to storage only through the repository
//! trait, which is injected per request.

pub mod orders;

pub use orders::{OrderService, UpdateScope};
