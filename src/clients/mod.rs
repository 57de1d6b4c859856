//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//!
//! Each client implements [`ActorClient`](resource_actor::ActorClient) for the
//! generic reads and the matching repository trait from [`crate::repository`].

pub mod customer_client;
pub mod order_client;
pub mod product_client;

pub use customer_client::*;
pub use order_client::*;
pub use product_client::*;
