//! # Order Actor
//!
//! Stores placed orders with their lines as one record. Orders are written once
//! by the order workflow and removed only as a whole.
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use resource_actor::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, OrderClient::new(generic_client))
}
