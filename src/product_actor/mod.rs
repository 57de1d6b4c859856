//! # Product Actor
//!
//! The catalog store. Besides CRUD it carries the stock actions used when an
//! order is placed.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // Current stock level (read-only)
//! let stock = product_client.check_stock(product_id).await?;
//!
//! // Take stock for several products at once; fails without touching any of
//! // them if one is short
//! product_client
//!     .reserve_quantity(&[ProductQuantity::new(product_id, 3)])
//!     .await?;
//! ```
//!
//! Because the actor handles one request at a time, the check and the decrement
//! inside `ReserveStock` cannot interleave with another order's reservation.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use resource_actor::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, ProductClient::new(generic_client))
}
