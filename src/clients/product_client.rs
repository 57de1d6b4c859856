//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and implements [`ProductsRepository`].
use crate::model::{Product, ProductCreate, ProductId, ProductQuantity, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use crate::repository::ProductsRepository;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<i64, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<ProductError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl ProductsRepository for ProductClient {
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError> {
        self.get_many(ids.to_vec()).await
    }

    #[instrument(skip(self, items), fields(count = items.len()))]
    async fn update_quantity(
        &self,
        items: &[ProductQuantity],
    ) -> Result<Vec<Product>, ProductError> {
        let ids = items.iter().map(|item| item.product_id).collect();
        let current = self.get_many(ids).await?;
        let updates = decremented(&current, items)?;
        debug!(?updates, "Writing quantities");
        self.inner
            .update_many(updates)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, items), fields(count = items.len()))]
    async fn reserve_quantity(
        &self,
        items: &[ProductQuantity],
    ) -> Result<Vec<Product>, ProductError> {
        let actions = items
            .iter()
            .map(|item| (item.product_id, ProductAction::ReserveStock(item.quantity)))
            .collect();
        self.inner
            .perform_actions(actions)
            .await
            .map_err(Self::map_error)?
            .into_iter()
            .map(|result| match result {
                ProductActionResult::ReserveStock(product) => Ok(product),
                other => Err(unexpected(other)),
            })
            .collect()
    }

    #[instrument(skip(self, params))]
    async fn create(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!(?params, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|product| product.name == name)
            .min_by_key(|product| product.id))
    }
}

/// New stock level for every product: current quantity minus the sum of the
/// amounts requested for it (0 when none is). No floor at zero, but a sum or
/// level outside `i64` fails with `InvalidQuantity`.
fn decremented(
    products: &[Product],
    items: &[ProductQuantity],
) -> Result<Vec<(ProductId, ProductUpdate)>, ProductError> {
    let mut requested: HashMap<ProductId, i64> = HashMap::new();
    for item in items {
        let sum = requested.entry(item.product_id).or_default();
        *sum = sum
            .checked_add(item.quantity)
            .ok_or(ProductError::InvalidQuantity {
                product_id: item.product_id,
                quantity: item.quantity,
            })?;
    }

    products
        .iter()
        .map(|product| {
            let amount = requested.get(&product.id).copied().unwrap_or(0);
            let level = product
                .quantity
                .checked_sub(amount)
                .ok_or(ProductError::InvalidQuantity {
                    product_id: product.id,
                    quantity: amount,
                })?;
            Ok((product.id, ProductUpdate::quantity(level)))
        })
        .collect()
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::{
        create_mock_client, expect_action_many, expect_get_many, expect_update_many, MockClient,
    };
    use rust_decimal::Decimal;

    fn product(quantity: i64) -> Product {
        Product::new(ProductId::new(), "Widget", Decimal::new(1000, 2), quantity)
    }

    #[test]
    fn decrement_sums_repeated_ids_and_has_no_floor() {
        let (a, b) = (product(5), product(1));
        let items = [
            ProductQuantity::new(a.id, 2),
            ProductQuantity::new(b.id, 4),
            ProductQuantity::new(a.id, 1),
        ];

        let updates = decremented(&[a.clone(), b.clone()], &items).unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].0, a.id);
        assert_eq!(updates[0].1.quantity, Some(2));
        assert_eq!(updates[1].0, b.id);
        assert_eq!(updates[1].1.quantity, Some(-3));
    }

    #[test]
    fn decrement_outside_i64_is_rejected() {
        let a = product(5);
        let half = i64::MAX / 2 + 1;

        let err = decremented(
            &[a.clone()],
            &[ProductQuantity::new(a.id, half), ProductQuantity::new(a.id, half)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProductError::InvalidQuantity {
                product_id: a.id,
                quantity: half,
            }
        );

        let mut drained = product(0);
        drained.quantity = -2;
        let err = decremented(&[drained.clone()], &[ProductQuantity::new(drained.id, i64::MAX)])
            .unwrap_err();
        assert_eq!(
            err,
            ProductError::InvalidQuantity {
                product_id: drained.id,
                quantity: i64::MAX,
            }
        );
    }

    #[tokio::test]
    async fn update_quantity_overflow_writes_nothing() {
        let mut mock = MockClient::<Product>::new();
        let stored = product(5);
        let half = i64::MAX / 2 + 1;
        mock.expect_get_many().return_ok(vec![stored.clone()]);

        let client = ProductClient::new(mock.client());
        let result = client
            .update_quantity(&[
                ProductQuantity::new(stored.id, half),
                ProductQuantity::new(stored.id, half),
            ])
            .await;

        assert!(matches!(result, Err(ProductError::InvalidQuantity { .. })));
        mock.verify();
    }

    #[tokio::test]
    async fn update_quantity_rereads_then_writes_one_batch() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);
        let stored = product(5);
        let id = stored.id;

        let task = tokio::spawn(async move {
            product_client
                .update_quantity(&[ProductQuantity::new(id, 3)])
                .await
        });

        let (ids, responder) = expect_get_many(&mut receiver)
            .await
            .expect("Expected GetMany request");
        assert_eq!(ids, vec![id]);
        responder.send(Ok(vec![stored.clone()])).unwrap();

        let (updates, responder) = expect_update_many(&mut receiver)
            .await
            .expect("Expected UpdateMany request");
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.quantity, Some(2));

        let mut after = stored;
        after.quantity = 2;
        responder.send(Ok(vec![after])).unwrap();

        let result = task.await.unwrap().unwrap();
        assert_eq!(result[0].quantity, 2);
    }

    #[tokio::test]
    async fn reserve_quantity_recovers_insufficient_stock() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);
        let id = ProductId::new();

        let task = tokio::spawn(async move {
            product_client
                .reserve_quantity(&[ProductQuantity::new(id, 10)])
                .await
        });

        let (actions, responder) = expect_action_many(&mut receiver)
            .await
            .expect("Expected ActionMany request");
        assert_eq!(actions, vec![(id, ProductAction::ReserveStock(10))]);

        let shortage = ProductError::InsufficientStock {
            product_id: id,
            requested: 10,
            available: 5,
        };
        responder
            .send(Err(FrameworkError::entity(shortage.clone())))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), shortage);
    }

    #[tokio::test]
    async fn find_by_name_matches_exactly() {
        let mut mock = MockClient::<Product>::new();
        let widget = product(1);
        let mut gadget = product(1);
        gadget.name = "Gadget".into();
        mock.expect_list().return_ok(vec![widget.clone(), gadget]);
        mock.expect_list().return_ok(vec![widget.clone()]);

        let client = ProductClient::new(mock.client());
        assert_eq!(client.find_by_name("Widget").await.unwrap(), Some(widget));
        assert_eq!(client.find_by_name("widget").await.unwrap(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn check_stock_reads_level() {
        let mut mock = MockClient::<Product>::new();
        let id = ProductId::new();
        mock.expect_action(id)
            .return_ok(ProductActionResult::CheckStock(42));

        let client = ProductClient::new(mock.client());
        assert_eq!(client.check_stock(id).await.unwrap(), 42);
        mock.verify();
    }
}
