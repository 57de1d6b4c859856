//! # Order Client
//!
//! Wraps a `ResourceClient<Order>` and implements [`OrdersRepository`].

use crate::model::{Order, OrderCreate, OrderId};
use crate::order_actor::OrderError;
use crate::repository::OrdersRepository;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl OrdersRepository for OrderClient {
    #[instrument(skip(self, params), fields(customer_id = %params.customer.id, lines = params.products.len()))]
    async fn create(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "create called");
        let order = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %order.id, "Order stored");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        self.get(*id).await
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &OrderId) -> Result<(), OrderError> {
        self.delete(*id).await
    }
}
