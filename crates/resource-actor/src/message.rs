//! # Generic Messages
//!
//! Requests exchanged between a [`ResourceClient`](crate::ResourceClient) and its
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to a resource actor.
///
/// The single-record variants map to CRUD plus a custom `Action`. The batch
/// variants let a caller read or mutate many records in one round trip:
///
/// - **GetMany**: returns the records that exist, in request order, each at most once.
/// - **List**: returns every stored record.
/// - **UpdateMany** / **ActionMany**: all-or-nothing. The actor applies every entry to
///   a staged copy and commits only if all of them succeed.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    GetMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    UpdateMany {
        updates: Vec<(T::Id, T::Update)>,
        respond_to: Response<Vec<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    ActionMany {
        actions: Vec<(T::Id, T::Action)>,
        respond_to: Response<Vec<T::ActionResult>>,
    },
}
