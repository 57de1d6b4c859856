//! # Resource Actor
//!
//! Building blocks for type-safe, in-memory record stores that are safe to share
//! across tasks. Each record type lives in its own **actor**: a Tokio task that owns
//! a `HashMap` of records and processes requests one at a time. Callers never touch
//! the map; they send messages through a cloneable client and await the reply.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]): the record type, its payloads and hooks
//! 2. **Runtime Layer** ([`ResourceActor`]): the mailbox loop that owns the records
//! 3. **Interface Layer** ([`ResourceClient`]): typed async handle to the mailbox
//!
//! Entity-specific wrappers (a `ProductClient` exposing `reserve_quantity`, say)
//! implement [`ActorClient`] to inherit `get`, `get_many`, `list` and `delete` with
//! errors already mapped into their own error enum.
//!
//! ## Defining an Entity
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use resource_actor::{ActorEntity, ResourceActor};
//!
//! #[derive(Clone, Debug)]
//! struct Counter {
//!     id: u64,
//!     value: i64,
//! }
//!
//! #[derive(Debug)]
//! struct CounterCreate;
//!
//! #[derive(Debug)]
//! enum CounterAction {
//!     Add(i64),
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("counter overflow")]
//! struct CounterError;
//!
//! #[async_trait]
//! impl ActorEntity for Counter {
//!     type Id = u64;
//!     type Create = CounterCreate;
//!     type Update = i64;
//!     type Action = CounterAction;
//!     type ActionResult = i64;
//!     type Context = ();
//!     type Error = CounterError;
//!
//!     fn generate_id(sequence: u64) -> u64 {
//!         sequence
//!     }
//!
//!     fn from_create_params(id: u64, _: CounterCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, value: 0 })
//!     }
//!
//!     async fn on_update(&mut self, value: i64, _: &()) -> Result<(), Self::Error> {
//!         self.value = value;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: CounterAction, _: &()) -> Result<i64, Self::Error> {
//!         let CounterAction::Add(n) = action;
//!         self.value = self.value.checked_add(n).ok_or(CounterError)?;
//!         Ok(self.value)
//!     }
//! }
//!
//! let (actor, client) = ResourceActor::<Counter>::new(32);
//! tokio::spawn(actor.run(()));
//! let counter = client.create(CounterCreate).await?;
//! client.perform_action(counter.id, CounterAction::Add(5)).await?;
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Requests to one actor are processed **sequentially**, so a check-and-modify done
//!   inside a single request (an action, or a batch) can never interleave with another
//! - Batch requests (`UpdateMany`, `ActionMany`) commit all entries or none
//! - Different actors run in parallel; no request spans two actors atomically
//!
//! ## Testing
//!
//! [`MockClient`](mock::MockClient) produces a real `ResourceClient<T>` whose requests
//! are answered from a queue of expectations. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
