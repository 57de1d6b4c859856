//! # Order Desk demo
//!
//! Seeds one customer and one product, places an order and prints it as JSON.
//! Settings come from `ORDER_DESK_*` environment variables (see
//! [`order_desk::config`]), logging from `RUST_LOG`.

use anyhow::Context;
use order_desk::config::OrderConfig;
use order_desk::create_order::CreateOrderRequest;
use order_desk::lifecycle::{setup_tracing, OrderSystem};
use order_desk::model::{CustomerCreate, ProductCreate, ProductQuantity};
use order_desk::repository::{CustomersRepository, ProductsRepository};
use rust_decimal::Decimal;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = OrderConfig::from_env().context("reading configuration")?;
    let system = OrderSystem::new(&config);

    let customer = system
        .customer_client
        .create(CustomerCreate {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await?;
    info!(customer_id = %customer.id, "Customer created");

    let product = system
        .product_client
        .create(ProductCreate {
            name: "Mechanical keyboard".to_string(),
            price: Decimal::new(8990, 2),
            quantity: 10,
        })
        .await?;
    info!(product_id = %product.id, stock = product.quantity, "Product created");

    let request = CreateOrderRequest {
        customer_id: customer.id,
        products: vec![ProductQuantity::new(product.id, 3)],
    };
    let order = system
        .create_order
        .execute(request)
        .instrument(tracing::info_span!("order_processing"))
        .await
        .context("placing order")?;

    println!("{}", serde_json::to_string_pretty(&order)?);

    let stock = system.product_client.check_stock(product.id).await?;
    let total = order.total().context("order total out of range")?;
    info!(product_id = %product.id, stock, %total, "Order placed");

    system.shutdown().await?;
    Ok(())
}
