//! [`ActorEntity`] implementation for [`Order`].

use super::OrderError;
use crate::model::{Order, OrderCreate, OrderId, OrderLine};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    fn generate_id(_sequence: u64) -> OrderId {
        OrderId::new()
    }

    /// Assigns line ids and one shared timestamp to the order and all of its lines.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        let now = Utc::now();
        Ok(Self {
            id,
            customer: params.customer,
            products: params
                .products
                .into_iter()
                .map(|line| OrderLine::new(line, now))
                .collect(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn on_create(&mut self, _ctx: &()) -> Result<(), Self::Error> {
        if self.products.is_empty() {
            return Err(OrderError::NoLines);
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(OrderError::Immutable(self.id.to_string()))
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(OrderError::UnsupportedAction)
    }
}
