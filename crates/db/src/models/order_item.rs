//! Order item model and wire DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use comanda_core::types::{DbId, Timestamp};

/// A row from the `order_items` table.
///
/// `ticket_id` is the non-unique grouping key shared by all items of one
/// customer order; `id` is the storage-assigned row key, exposed so clients
/// can target a single line precisely. `status` is kept as the stored
/// string; the enumeration is enforced at the service layer before any
/// write.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: DbId,
    pub ticket_id: String,
    pub product: String,
    pub quantity: i32,
    pub note: String,
    pub unit_price: Decimal,
    pub status: String,
    pub updated_at: Timestamp,
}

/// Validated insert payload. Built by the service after creation
/// validation and defaulting; status is not a field because inserts always
/// start at `pending`.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub ticket_id: String,
    pub product: String,
    pub quantity: i32,
    pub note: String,
    pub unit_price: Decimal,
}

/// DTO for creating an order line.
///
/// Required fields are optional here so the service can report the first
/// missing one by name instead of surfacing a deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub ticket_id: Option<String>,
    pub product: Option<String>,
    pub quantity: Option<i32>,
    pub note: Option<String>,
    pub unit_price: Option<Decimal>,
}

/// DTO for a status transition.
///
/// `product` omitted or `"ALL"` targets the whole ticket; `item_id`, when
/// present, targets one row precisely and takes precedence over the
/// product name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOrderStatus {
    pub ticket_id: String,
    pub status: String,
    pub product: Option<String>,
    pub item_id: Option<DbId>,
}
