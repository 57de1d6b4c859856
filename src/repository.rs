//! Storage seams of the order workflow.
//!
//! The workflow depends only on these traits. The typed actor clients in
//! [`crate::clients`] implement them against in-process stores; tests can swap in
//! anything else.
//!
//! Lookups report absence as `Ok(None)` or by omitting records. Errors mean the
//! store itself failed.

use crate::customer_actor::CustomerError;
use crate::model::{
    Customer, CustomerCreate, CustomerId, Order, OrderCreate, OrderId, Product, ProductCreate,
    ProductId, ProductQuantity,
};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use async_trait::async_trait;

#[async_trait]
pub trait CustomersRepository: Send + Sync {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, CustomerError>;

    async fn create(&self, params: CustomerCreate) -> Result<Customer, CustomerError>;
}

#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Resolves every id that exists. Unknown ids are skipped.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError>;

    /// Unchecked decrement: re-reads the named products and subtracts the
    /// requested amounts in one batch write. Stock may go negative.
    async fn update_quantity(
        &self,
        items: &[ProductQuantity],
    ) -> Result<Vec<Product>, ProductError>;

    /// Conditional decrement: takes the requested amounts only if every product
    /// exists and holds enough stock; otherwise nothing changes.
    async fn reserve_quantity(
        &self,
        items: &[ProductQuantity],
    ) -> Result<Vec<Product>, ProductError>;

    async fn create(&self, params: ProductCreate) -> Result<Product, ProductError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductError>;
}

#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Stores the order with its lines and returns it with generated ids.
    async fn create(&self, params: OrderCreate) -> Result<Order, OrderError>;

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Deletes the order and its lines.
    async fn remove(&self, id: &OrderId) -> Result<(), OrderError>;
}
