//! Error types for the order workflow.

use crate::customer_actor::CustomerError;
use crate::model::{CustomerId, ProductId};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Why an order could not be placed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CreateOrderError {
    #[error("Customer does not exist: {0}")]
    CustomerNotFound(CustomerId),

    /// None of the requested products exist, or nothing was left to order.
    #[error("No products to order")]
    EmptyProductSet,

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: ProductId, quantity: i64 },

    /// A store failed while reading or writing.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<CustomerError> for CreateOrderError {
    fn from(e: CustomerError) -> Self {
        CreateOrderError::Persistence(e.to_string())
    }
}

impl From<OrderError> for CreateOrderError {
    fn from(e: OrderError) -> Self {
        CreateOrderError::Persistence(e.to_string())
    }
}

impl CreateOrderError {
    /// Maps a failed stock reservation, keeping shortages and bad amounts
    /// recognizable.
    pub fn from_reservation(e: ProductError) -> Self {
        match e {
            ProductError::InsufficientStock {
                product_id,
                requested,
                available,
            } => CreateOrderError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            ProductError::InvalidQuantity {
                product_id,
                quantity,
            } => CreateOrderError::InvalidQuantity {
                product_id,
                quantity,
            },
            other => CreateOrderError::Persistence(other.to_string()),
        }
    }
}

impl From<ProductError> for CreateOrderError {
    fn from(e: ProductError) -> Self {
        CreateOrderError::Persistence(e.to_string())
    }
}
