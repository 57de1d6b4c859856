//! # Order Creation Workflow
//!
//! [`CreateOrderService`] turns a customer id and a list of product/quantity
//! pairs into a stored [`Order`], then takes the ordered quantities out of stock.
//!
//! ## Steps
//!
//! 1. Resolve the customer.
//! 2. Resolve every distinct product in one catalog read.
//! 3. Apply the [`QuantityRule`](crate::config::QuantityRule) and check the summed
//!    quantity per product against stock.
//! 4. Price the lines from the catalog, in request order.
//! 5. Store the order.
//! 6. Take stock according to the [`StockPolicy`].
//!
//! Store calls are issued one after another, never in parallel. Any failure ends
//! the call. Under [`StockPolicy::Conditional`] a failed reservation also removes
//! the order stored in step 5.
//!
//! ## Trace Example
//!
//! ```text
//! INFO execute{customer_id=0190... items=2}: Order created order_id=0190... lines=2
//! ```

pub mod error;
pub mod pricing;

pub use error::*;

use crate::config::{OrderConfig, StockPolicy};
use crate::model::{CustomerId, Order, OrderCreate, Product, ProductId, ProductQuantity};
use crate::repository::{CustomersRepository, OrdersRepository, ProductsRepository};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

/// Input of [`CreateOrderService::execute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: CustomerId,
    pub products: Vec<ProductQuantity>,
}

/// Places orders against the three stores it is built with.
pub struct CreateOrderService<C, P, O> {
    customers: C,
    products: P,
    orders: O,
    config: OrderConfig,
}

impl<C, P, O> CreateOrderService<C, P, O>
where
    C: CustomersRepository,
    P: ProductsRepository,
    O: OrdersRepository,
{
    pub fn new(customers: C, products: P, orders: O, config: OrderConfig) -> Self {
        Self {
            customers,
            products,
            orders,
            config,
        }
    }

    /// Places one order.
    ///
    /// The returned order is the one stored in step 5; the stock change made
    /// afterwards is not reflected in it.
    #[instrument(
        skip(self, request),
        fields(customer_id = %request.customer_id, items = request.products.len())
    )]
    pub async fn execute(&self, request: CreateOrderRequest) -> Result<Order, CreateOrderError> {
        debug!(?request, "execute called");

        let customer = self
            .customers
            .find_by_id(&request.customer_id)
            .await?
            .ok_or(CreateOrderError::CustomerNotFound(request.customer_id))?;

        let ids = pricing::distinct_ids(&request.products);
        let catalog: HashMap<ProductId, Product> = self
            .products
            .find_all_by_id(&ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();
        if catalog.is_empty() {
            warn!(requested = ids.len(), "None of the requested products exist");
            return Err(CreateOrderError::EmptyProductSet);
        }

        let items = pricing::apply_quantity_rule(&request.products, self.config.quantity_rule)?;
        if items.is_empty() {
            return Err(CreateOrderError::EmptyProductSet);
        }
        let totals = pricing::requested_totals(&items)?;
        pricing::check_stock(&totals, &catalog)?;

        let lines = pricing::build_lines(&items, &catalog);
        let order = self
            .orders
            .create(OrderCreate {
                customer,
                products: lines,
            })
            .await?;

        let adjustments: Vec<ProductQuantity> = totals
            .into_iter()
            .filter(|total| catalog.contains_key(&total.product_id))
            .collect();
        self.take_stock(&order, &adjustments).await?;

        info!(order_id = %order.id, lines = order.products.len(), "Order created");
        Ok(order)
    }

    async fn take_stock(
        &self,
        order: &Order,
        adjustments: &[ProductQuantity],
    ) -> Result<(), CreateOrderError> {
        match self.config.stock_policy {
            StockPolicy::Unchecked => {
                self.products.update_quantity(adjustments).await?;
                Ok(())
            }
            StockPolicy::Conditional => match self.products.reserve_quantity(adjustments).await {
                Ok(_) => Ok(()),
                Err(e) => {
                    warn!(order_id = %order.id, error = %e, "Reservation failed, removing order");
                    if let Err(undo) = self.orders.remove(&order.id).await {
                        error!(
                            order_id = %order.id,
                            error = %undo,
                            "Failed to remove order after reservation failure"
                        );
                    }
                    Err(CreateOrderError::from_reservation(e))
                }
            },
        }
    }
}
