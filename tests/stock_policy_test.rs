use order_desk::config::{OrderConfig, QuantityRule, StockPolicy};
use order_desk::create_order::{CreateOrderError, CreateOrderRequest, CreateOrderService};
use order_desk::lifecycle::OrderSystem;
use order_desk::model::{Customer, CustomerCreate, Product, ProductCreate, ProductQuantity};
use order_desk::repository::{CustomersRepository, ProductsRepository};
use resource_actor::ActorClient;
use rust_decimal::Decimal;
use std::sync::Arc;

async fn seed(system: &OrderSystem, stock: i64) -> (Customer, Product) {
    let customer = system
        .customer_client
        .create(CustomerCreate {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
        })
        .await
        .unwrap();
    let product = system
        .product_client
        .create(ProductCreate {
            name: "Widget".to_string(),
            price: Decimal::new(499, 2),
            quantity: stock,
        })
        .await
        .unwrap();
    (customer, product)
}

fn one(customer: &Customer, product: &Product, quantity: i64) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id: customer.id,
        products: vec![ProductQuantity::new(product.id, quantity)],
    }
}

/// Many orders racing for the same stock: the conditional reservation lets
/// exactly as many through as the stock covers, and every loser leaves no order.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_conditional_policy_never_oversells() {
    let system = OrderSystem::new(&OrderConfig::default());
    let (customer, product) = seed(&system, 20).await;

    let service = Arc::new(CreateOrderService::new(
        system.customer_client.clone(),
        system.product_client.clone(),
        system.order_client.clone(),
        OrderConfig::default(),
    ));

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let service = service.clone();
        let request = one(&customer, &product, 3);
        tasks.push(tokio::spawn(async move { service.execute(request).await }));
    }

    let mut placed = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => placed += 1,
            Err(CreateOrderError::InsufficientStock { .. }) => {}
            Err(other) => panic!("Unexpected error: {other}"),
        }
    }

    assert_eq!(placed, 6);
    assert_eq!(system.product_client.check_stock(product.id).await.unwrap(), 2);
    assert_eq!(system.order_client.list().await.unwrap().len(), 6);

    drop(service);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_unchecked_policy_decrements() {
    let config = OrderConfig {
        stock_policy: StockPolicy::Unchecked,
        ..OrderConfig::default()
    };
    let system = OrderSystem::new(&config);
    let (customer, product) = seed(&system, 5).await;

    system
        .create_order
        .execute(one(&customer, &product, 3))
        .await
        .unwrap();
    assert_eq!(system.product_client.check_stock(product.id).await.unwrap(), 2);

    // The pre-check still applies sequentially.
    let result = system
        .create_order
        .execute(one(&customer, &product, 3))
        .await;
    assert!(matches!(
        result,
        Err(CreateOrderError::InsufficientStock { available: 2, .. })
    ));

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_update_quantity_has_no_floor() {
    let system = OrderSystem::new(&OrderConfig::default());
    let (_, product) = seed(&system, 2).await;

    let updated = system
        .product_client
        .update_quantity(&[ProductQuantity::new(product.id, 5)])
        .await
        .unwrap();
    assert_eq!(updated[0].quantity, -3);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_reserve_quantity_is_all_or_nothing() {
    let system = OrderSystem::new(&OrderConfig::default());
    let (_, plenty) = seed(&system, 10).await;
    let scarce = system
        .product_client
        .create(ProductCreate {
            name: "Gadget".to_string(),
            price: Decimal::ONE,
            quantity: 1,
        })
        .await
        .unwrap();

    let result = system
        .product_client
        .reserve_quantity(&[
            ProductQuantity::new(plenty.id, 4),
            ProductQuantity::new(scarce.id, 2),
        ])
        .await;

    assert!(result.is_err());
    assert_eq!(system.product_client.check_stock(plenty.id).await.unwrap(), 10);
    assert_eq!(system.product_client.check_stock(scarce.id).await.unwrap(), 1);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_quantity_rules() {
    // drop: the zero line disappears, the rest is ordered
    let config = OrderConfig {
        quantity_rule: QuantityRule::DropNonPositive,
        ..OrderConfig::default()
    };
    let system = OrderSystem::new(&config);
    let (customer, product) = seed(&system, 5).await;

    let mut request = one(&customer, &product, 2);
    request.products.push(ProductQuantity::new(product.id, 0));
    let order = system.create_order.execute(request).await.unwrap();
    assert_eq!(order.products.len(), 1);
    system.shutdown().await.expect("Shutdown failed");

    // accept: the zero line is stored as requested
    let config = OrderConfig {
        quantity_rule: QuantityRule::AcceptAll,
        ..OrderConfig::default()
    };
    let system = OrderSystem::new(&config);
    let (customer, product) = seed(&system, 5).await;

    let mut request = one(&customer, &product, 2);
    request.products.push(ProductQuantity::new(product.id, 0));
    let order = system.create_order.execute(request).await.unwrap();
    assert_eq!(order.products.len(), 2);
    assert_eq!(order.products[1].quantity, 0);
    assert_eq!(system.product_client.check_stock(product.id).await.unwrap(), 3);
    system.shutdown().await.expect("Shutdown failed");

    // reject (default): nothing is stored
    let system = OrderSystem::new(&OrderConfig::default());
    let (customer, product) = seed(&system, 5).await;

    let result = system
        .create_order
        .execute(one(&customer, &product, -1))
        .await;
    assert_eq!(
        result,
        Err(CreateOrderError::InvalidQuantity {
            product_id: product.id,
            quantity: -1,
        })
    );
    assert!(system.order_client.list().await.unwrap().is_empty());
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_repeated_items_past_i64_leave_stock_untouched() {
    let half = i64::MAX / 2 + 1;

    for policy in [StockPolicy::Conditional, StockPolicy::Unchecked] {
        let config = OrderConfig {
            stock_policy: policy,
            ..OrderConfig::default()
        };
        let system = OrderSystem::new(&config);
        let (customer, product) = seed(&system, 5).await;

        let mut request = one(&customer, &product, half);
        request.products.push(ProductQuantity::new(product.id, half));
        let result = system.create_order.execute(request).await;

        assert_eq!(
            result,
            Err(CreateOrderError::InvalidQuantity {
                product_id: product.id,
                quantity: half,
            }),
            "policy {policy:?}"
        );
        assert_eq!(system.product_client.check_stock(product.id).await.unwrap(), 5);
        assert!(system.order_client.list().await.unwrap().is_empty());

        system.shutdown().await.expect("Shutdown failed");
    }
}

#[tokio::test]
async fn test_update_quantity_past_i64_writes_nothing() {
    let system = OrderSystem::new(&OrderConfig::default());
    let (_, product) = seed(&system, 5).await;
    let half = i64::MAX / 2 + 1;

    let result = system
        .product_client
        .update_quantity(&[
            ProductQuantity::new(product.id, half),
            ProductQuantity::new(product.id, half),
        ])
        .await;

    assert!(result.is_err());
    assert_eq!(system.product_client.check_stock(product.id).await.unwrap(), 5);

    system.shutdown().await.expect("Shutdown failed");
}
