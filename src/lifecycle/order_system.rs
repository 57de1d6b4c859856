use crate::clients::{CustomerClient, OrderClient, ProductClient};
use crate::config::OrderConfig;
use crate::create_order::CreateOrderService;
use thiserror::Error;
use tracing::{error, info};

/// The order service wired to the actor-backed stores.
pub type OrderService = CreateOrderService<CustomerClient, ProductClient, OrderClient>;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// Owns the running store actors and the clients wired to them.
///
/// # Architecture
///
/// - **Customer Actor**: customer records (CRUD only)
/// - **Product Actor**: catalog with stock actions
/// - **Order Actor**: placed orders
///
/// None of the actors depend on each other; the order workflow coordinates
/// them from the outside through [`OrderService`].
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(&OrderConfig::from_env()?);
///
/// let customer = system.customer_client.create(customer_params).await?;
/// let product = system.product_client.create(product_params).await?;
/// let order = system.create_order.execute(request).await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub customer_client: CustomerClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,

    /// The order workflow, holding its own clones of the three clients.
    pub create_order: OrderService,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns the three store actors and wires the order workflow to them.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &OrderConfig) -> Self {
        let capacity = config.mailbox_capacity.max(1);
        let (customer_actor, customer_client) = crate::customer_actor::new(capacity);
        let (product_actor, product_client) = crate::product_actor::new(capacity);
        let (order_actor, order_client) = crate::order_actor::new(capacity);

        let handles = vec![
            tokio::spawn(customer_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run(())),
        ];

        let create_order = CreateOrderService::new(
            customer_client.clone(),
            product_client.clone(),
            order_client.clone(),
            config.clone(),
        );

        info!(
            quantity_rule = ?config.quantity_rule,
            stock_policy = ?config.stock_policy,
            "Order system started"
        );

        Self {
            customer_client,
            product_client,
            order_client,
            create_order,
            handles,
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping every client closes the actors' mailboxes; each actor then drains
    /// and exits its loop. Every actor task is awaited; the first failure is
    /// returned once all of them have finished. Clones of the clients held elsewhere keep their actor
    /// alive, so drop them before calling this.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.create_order);
        drop(self.customer_client);
        drop(self.product_client);
        drop(self.order_client);

        let mut first_failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                first_failure.get_or_insert(e);
            }
        }

        match first_failure {
            Some(e) => Err(e.into()),
            None => {
                info!("System shutdown complete.");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn shutdown_awaits_every_actor_after_a_failure() {
        let mut system = OrderSystem::new(&OrderConfig::default());
        let finished = Arc::new(AtomicBool::new(false));

        system.handles.insert(
            0,
            tokio::spawn(async {
                panic!("actor crashed");
            }),
        );
        let flag = finished.clone();
        system.handles.push(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            flag.store(true, Ordering::SeqCst);
        }));

        let result = system.shutdown().await;

        assert!(matches!(result, Err(SystemError::ActorTask(e)) if e.is_panic()));
        assert!(finished.load(Ordering::SeqCst));
    }
}
