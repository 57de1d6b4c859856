use crate::model::ProductId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog entry: the authoritative source of price and stock.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
///
/// `quantity` is signed. Stock only goes below zero through an unchecked
/// decrement, which is exactly the oversell the conditional policy prevents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

/// Payload for updating an existing product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
}

impl ProductUpdate {
    /// An update that only sets the stock level.
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }
}

/// One entry of a stock adjustment: how many units of which product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuantity {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub quantity: i64,
}

impl ProductQuantity {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

impl Product {
    /// Builds a product with the price normalized to two decimal places.
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, quantity: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            price: price.round_dp(2),
            quantity,
            created_at: now,
            updated_at: now,
        }
    }
}
