//! Domain logic for the kitchen order board.
//!
//! Pure types and functions shared by the database and API crates: the
//! order status enumeration, the ticket grouping fold, creation
//! validation, and the domain error taxonomy. No I/O happens here.

pub mod error;
pub mod order;
pub mod status;
pub mod ticket;
pub mod types;
