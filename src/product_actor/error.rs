//! Error types for the Product actor.

use crate::model::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product name is blank.
    #[error("Product name must not be empty")]
    EmptyName,

    /// Prices cannot be negative.
    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    /// The quantity is negative where only non-negative amounts make sense.
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: ProductId, quantity: i64 },

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}
