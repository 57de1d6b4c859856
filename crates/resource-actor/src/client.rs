//! # Generic Client
//!
//! The async handle callers use to talk to a [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only the sending half of the actor's mailbox, so cloning is cheap and
/// clones can be shared across tasks. When every clone is dropped the actor's
/// loop ends.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    /// Sends one request and waits for its reply.
    async fn call<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Creates a record and returns it as stored, generated id included.
    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Resolves many ids at once. Unknown ids are skipped, not reported.
    pub async fn get_many(&self, ids: Vec<T::Id>) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::GetMany { ids, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    /// Applies every update or none of them.
    pub async fn update_many(
        &self,
        updates: Vec<(T::Id, T::Update)>,
    ) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::UpdateMany {
            updates,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Runs every action or none of them; results come back in input order.
    pub async fn perform_actions(
        &self,
        actions: Vec<(T::Id, T::Action)>,
    ) -> Result<Vec<T::ActionResult>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::ActionMany {
            actions,
            respond_to,
        })
        .await
    }
}
