//! Ticket grouping.
//!
//! A "ticket" is the set of order items sharing one ticket id. It is never
//! persisted; the board derives it on every read by folding the flat item
//! sequence into a map keyed by ticket id, preserving encounter order.

use indexmap::IndexMap;

/// Fold a flat item sequence into `ticket_id → items`, preserving the order
/// in which tickets are first encountered and the item order within each
/// ticket.
///
/// Generic over the item type via a key accessor so the db crate's row
/// struct does not leak into core.
pub fn group_by_ticket<T, K>(items: impl IntoIterator<Item = T>, key: K) -> IndexMap<String, Vec<T>>
where
    K: Fn(&T) -> &str,
{
    let mut tickets: IndexMap<String, Vec<T>> = IndexMap::new();
    for item in items {
        let id = key(&item).to_string();
        tickets.entry(id).or_default().push(item);
    }
    tickets
}
