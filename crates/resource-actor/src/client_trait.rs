//! # ActorClient Trait
//!
//! Shared plumbing for entity-specific client wrappers: default `get`, `get_many`,
//! `list` and `delete` built on the wrapped [`ResourceClient`], with framework
//! failures mapped into the wrapper's own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for entity-specific clients to inherit standard read/delete operations.
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct CustomerClient {
///     inner: ResourceClient<Customer>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Customer> for CustomerClient {
///     type Error = CustomerError;
///
///     fn inner(&self) -> &ResourceClient<Customer> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         CustomerError::ActorCommunicationError(e.to_string())
///     }
/// }
///
/// // get(), get_many(), list() and delete() now come for free.
/// let customer = client.get(id).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The entity-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the entity-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity among `ids` that exists.
    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    async fn get_many(&self, ids: Vec<T::Id>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get_many(ids).await.map_err(Self::map_error)
    }

    /// Fetch every stored entity.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
