//! Order status enumeration.
//!
//! Statuses are stored as TEXT in the `order_items` table and enforced at
//! the application layer, not by a database constraint. The board UI drives
//! items forward through `pending → in_preparation → completed → archived`,
//! but the server deliberately accepts any target status in the enumeration
//! regardless of the current one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a single order item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InPreparation,
    Completed,
    Archived,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InPreparation,
        OrderStatus::Completed,
        OrderStatus::Archived,
    ];

    /// The stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InPreparation => "in_preparation",
            OrderStatus::Completed => "completed",
            OrderStatus::Archived => "archived",
        }
    }

    /// Parse a stored/wire string. Returns `None` for anything outside
    /// the enumeration.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "in_preparation" => Some(OrderStatus::InPreparation),
            "completed" => Some(OrderStatus::Completed),
            "archived" => Some(OrderStatus::Archived),
            _ => None,
        }
    }

    /// `archived` is the terminal state; an item never leaves it on the
    /// board (the server still permits it, the UI never offers it).
    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Archived
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
