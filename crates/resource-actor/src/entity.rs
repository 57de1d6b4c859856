//! # ActorEntity Trait
//!
//! The contract every stored record type (customer, product, order, …) implements
//! to be managed by a [`ResourceActor`](crate::ResourceActor). Associated types pin
//! down the id, the create/update payloads, the custom actions and the error type,
//! so a product payload can never be sent to the order store.
//!
//! # Provided Methods (Hooks)
//! [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.
//! Override them to validate a record before it is stored or before it is removed.
//!
//! # Batches
//! Batch requests (`UpdateMany`, `ActionMany`) run the same hooks on a staged copy of
//! every touched record. A hook failing anywhere in the batch discards the whole
//! batch, so hooks must not rely on side effects outside `self`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored entity must implement to be managed by `ResourceActor`.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g. a UUID newtype).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Entity-specific operations beyond CRUD (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor when it starts running.
    /// Use `()` if none are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per entity, shared by every operation. Clients recover it from
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Mints the id of a record about to be created.
    ///
    /// `sequence` is the actor's own creation counter, starting at 1. Entities
    /// keyed by random or time-ordered ids are free to ignore it.
    fn generate_id(sequence: u64) -> Self::Id;

    /// Construct the full entity from its id and payload.
    /// Called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles a custom entity-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
