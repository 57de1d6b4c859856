//! # Generic Actor Server
//!
//! The `ResourceActor` owns the records of one entity type and processes every
//! request sequentially, which is what makes each single request, batch requests
//! included, atomic with respect to every other request on the same store.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Concurrency Model
/// The actor owns its `store` outright and handles one message at a time, so the
/// store needs no `Mutex`. Callers talk to it only through a [`ResourceClient`].
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new(capacity)` returns the actor and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the returned future on the Tokio runtime.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Product>::new(32);
/// tokio::spawn(actor.run(()));
/// let product = client.create(params).await?;
/// ```
///
/// # Operations
///
/// * **Create**: mints an id via [`ActorEntity::generate_id`], builds the entity,
///   runs `on_create`, stores it and replies with the stored entity.
/// * **Get / GetMany / List**: reply with clones; missing ids are not errors.
/// * **Update / Action**: run the hook on the stored entity in place.
/// * **UpdateMany / ActionMany**: run the hooks on staged clones and commit them
///   together, or reply with the first failure and leave the store untouched.
/// * **Delete**: runs `on_delete`, then removes the entity.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u64,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; when it is full, client calls wait.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// The `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = entity_type::<T>();
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg, &context, entity_type).await;
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn handle(&mut self, msg: ResourceRequest<T>, ctx: &T::Context, entity_type: &str) {
        match msg {
            ResourceRequest::Create { params, respond_to } => {
                debug!(entity_type, ?params, "Create");
                let result = self.create(params, ctx).await;
                match &result {
                    Ok(_) => info!(entity_type, size = self.store.len(), "Created"),
                    Err(e) => warn!(entity_type, error = %e, "Create failed"),
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Get { id, respond_to } => {
                let item = self.store.get(&id).cloned();
                debug!(entity_type, %id, found = item.is_some(), "Get");
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::GetMany { ids, respond_to } => {
                let items = self.get_many(&ids);
                debug!(entity_type, requested = ids.len(), found = items.len(), "GetMany");
                let _ = respond_to.send(Ok(items));
            }
            ResourceRequest::List { respond_to } => {
                debug!(entity_type, size = self.store.len(), "List");
                let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
            }
            ResourceRequest::Update {
                id,
                update,
                respond_to,
            } => {
                debug!(entity_type, %id, ?update, "Update");
                let result = match self.store.get_mut(&id) {
                    Some(item) => match item.on_update(update, ctx).await {
                        Ok(()) => Ok(item.clone()),
                        Err(e) => Err(FrameworkError::entity(e)),
                    },
                    None => Err(FrameworkError::NotFound(id.to_string())),
                };
                log_outcome(entity_type, &id, &result, "Updated", "Update failed");
                let _ = respond_to.send(result);
            }
            ResourceRequest::UpdateMany {
                updates,
                respond_to,
            } => {
                debug!(entity_type, count = updates.len(), "UpdateMany");
                let result = self.update_many(updates, ctx).await;
                match &result {
                    Ok(items) => info!(entity_type, count = items.len(), "Updated batch"),
                    Err(e) => warn!(entity_type, error = %e, "Batch update rolled back"),
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Delete { id, respond_to } => {
                debug!(entity_type, %id, "Delete");
                let result = self.delete(&id, ctx).await;
                log_outcome(entity_type, &id, &result, "Deleted", "Delete failed");
                let _ = respond_to.send(result);
            }
            ResourceRequest::Action {
                id,
                action,
                respond_to,
            } => {
                debug!(entity_type, %id, ?action, "Action");
                let result = match self.store.get_mut(&id) {
                    Some(item) => item
                        .handle_action(action, ctx)
                        .await
                        .map_err(FrameworkError::entity),
                    None => Err(FrameworkError::NotFound(id.to_string())),
                };
                log_outcome(entity_type, &id, &result, "Action ok", "Action failed");
                let _ = respond_to.send(result);
            }
            ResourceRequest::ActionMany {
                actions,
                respond_to,
            } => {
                debug!(entity_type, count = actions.len(), "ActionMany");
                let result = self.action_many(actions, ctx).await;
                match &result {
                    Ok(results) => info!(entity_type, count = results.len(), "Batch action ok"),
                    Err(e) => warn!(entity_type, error = %e, "Batch action rolled back"),
                }
                let _ = respond_to.send(result);
            }
        }
    }

    async fn create(&mut self, params: T::Create, ctx: &T::Context) -> Result<T, FrameworkError> {
        let id = T::generate_id(self.next_id);
        self.next_id += 1;

        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::entity)?;
        item.on_create(ctx).await.map_err(FrameworkError::entity)?;
        self.store.insert(id, item.clone());
        Ok(item)
    }

    fn get_many(&self, ids: &[T::Id]) -> Vec<T> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.store.get(id).cloned())
            .collect()
    }

    async fn update_many(
        &mut self,
        updates: Vec<(T::Id, T::Update)>,
        ctx: &T::Context,
    ) -> Result<Vec<T>, FrameworkError> {
        let mut staged = HashMap::new();
        let mut order = Vec::new();

        for (id, update) in updates {
            let item = stage(&self.store, &mut staged, &id)
                .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
            item.on_update(update, ctx)
                .await
                .map_err(FrameworkError::entity)?;
            if !order.contains(&id) {
                order.push(id);
            }
        }

        let updated = order
            .iter()
            .filter_map(|id| staged.get(id).cloned())
            .collect();
        self.store.extend(staged);
        Ok(updated)
    }

    async fn action_many(
        &mut self,
        actions: Vec<(T::Id, T::Action)>,
        ctx: &T::Context,
    ) -> Result<Vec<T::ActionResult>, FrameworkError> {
        let mut staged = HashMap::new();
        let mut results = Vec::with_capacity(actions.len());

        for (id, action) in actions {
            let item = stage(&self.store, &mut staged, &id)
                .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
            let result = item
                .handle_action(action, ctx)
                .await
                .map_err(FrameworkError::entity)?;
            results.push(result);
        }

        self.store.extend(staged);
        Ok(results)
    }

    async fn delete(&mut self, id: &T::Id, ctx: &T::Context) -> Result<(), FrameworkError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(ctx).await.map_err(FrameworkError::entity)?;
        self.store.remove(id);
        Ok(())
    }
}

/// Returns the staged copy of `id`, cloning it out of `store` on first touch.
fn stage<'a, T: ActorEntity>(
    store: &HashMap<T::Id, T>,
    staged: &'a mut HashMap<T::Id, T>,
    id: &T::Id,
) -> Option<&'a mut T> {
    if !staged.contains_key(id) {
        let item = store.get(id)?.clone();
        staged.insert(id.clone(), item);
    }
    staged.get_mut(id)
}

/// Short type name for log fields ("Product" rather than the full module path).
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}

fn log_outcome<I: std::fmt::Display, R>(
    entity_type: &str,
    id: &I,
    result: &Result<R, FrameworkError>,
    ok: &str,
    failed: &str,
) {
    match result {
        Ok(_) => info!(entity_type, %id, "{}", ok),
        Err(FrameworkError::NotFound(_)) => warn!(entity_type, %id, "Not found"),
        Err(e) => warn!(entity_type, %id, error = %e, "{}", failed),
    }
}
