//! Order creation validation and defaults.

use crate::error::OrderError;

/// Sentinel note stored when an order line carries no note.
pub const DEFAULT_NOTE: &str = "no notes";

/// Whole-ticket scope marker on the wire: `product` omitted or set to this
/// value means the status change applies to every item of the ticket.
pub const SCOPE_ALL: &str = "ALL";

/// Validate the required creation fields, checked in the fixed order
/// `ticketId → product → quantity`. The first absent or empty field fails
/// with [`OrderError::MissingField`] naming it; a quantity below 1 counts
/// as missing.
///
/// Returns the validated fields so callers do not re-unwrap the options.
pub fn validate_new_order<'a>(
    ticket_id: Option<&'a str>,
    product: Option<&'a str>,
    quantity: Option<i32>,
) -> Result<(&'a str, &'a str, i32), OrderError> {
    let ticket_id = ticket_id
        .filter(|t| !t.trim().is_empty())
        .ok_or(OrderError::MissingField("ticketId"))?;
    let product = product
        .filter(|p| !p.trim().is_empty())
        .ok_or(OrderError::MissingField("product"))?;
    let quantity = quantity
        .filter(|q| *q >= 1)
        .ok_or(OrderError::MissingField("quantity"))?;

    Ok((ticket_id, product, quantity))
}
