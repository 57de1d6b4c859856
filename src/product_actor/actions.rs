//! Custom actions for the Product actor.
//!
//! Handled by [`ActorEntity::handle_action`](resource_actor::ActorEntity::handle_action)
//! on [`Product`](crate::model::Product).

use crate::model::Product;

/// Custom actions for Product entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes the given number of units out of stock.
    ///
    /// # Errors
    /// Fails if the amount is negative or exceeds the available stock. Zero is a no-op.
    ReserveStock(i64),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level
    CheckStock(i64),
    /// The product after the reservation
    ReserveStock(Product),
}
