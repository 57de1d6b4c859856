//! # Customer Actor
//!
//! The simplest store in the system: plain CRUD over [`Customer`] records with no
//! dependencies and no custom actions.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Customer`]
//! - [`error`] - [`CustomerError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, client) = customer_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let customer = client
//!     .create(CustomerCreate {
//!         name: "Alice".to_string(),
//!         email: "alice@example.com".to_string(),
//!     })
//!     .await?;
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::model::Customer;
use resource_actor::ResourceActor;

/// Creates a new Customer actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Customer>, CustomerClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, CustomerClient::new(generic_client))
}
