use crate::model::{Customer, OrderId, OrderLineId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A placed order together with its lines.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
/// Orders are written once and never changed afterwards; deleting an order
/// deletes its lines with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub products: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One product line of an order.
///
/// `price` is a snapshot of the catalog price when the order was placed. The
/// referenced product may since have been deleted; the line stays as it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub product_id: ProductId,
    pub price: Decimal,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new order. Line ids are generated by the store.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: Customer,
    pub products: Vec<OrderLineCreate>,
}

/// A line as computed by the workflow, before it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineCreate {
    pub product_id: ProductId,
    pub price: Decimal,
    pub quantity: i64,
}

impl Order {
    /// Sum of `price * quantity` over every line, or `None` when it does not
    /// fit in a [`Decimal`].
    pub fn total(&self) -> Option<Decimal> {
        self.products.iter().try_fold(Decimal::ZERO, |sum, line| {
            line.price
                .checked_mul(Decimal::from(line.quantity))
                .and_then(|amount| sum.checked_add(amount))
        })
    }
}

impl OrderLine {
    pub fn new(line: OrderLineCreate, at: DateTime<Utc>) -> Self {
        Self {
            id: OrderLineId::new(),
            product_id: line.product_id,
            price: line.price,
            quantity: line.quantity,
            created_at: at,
            updated_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CustomerId;

    fn order_of(lines: &[(Decimal, i64)]) -> Order {
        let now = Utc::now();
        Order {
            id: OrderId::new(),
            customer: Customer::new(CustomerId::new(), "Alice", "alice@example.com"),
            products: lines
                .iter()
                .map(|&(price, quantity)| {
                    OrderLine::new(
                        OrderLineCreate {
                            product_id: ProductId::new(),
                            price,
                            quantity,
                        },
                        now,
                    )
                })
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn total_sums_every_line() {
        let order = order_of(&[(Decimal::new(1000, 2), 3), (Decimal::new(250, 2), 2)]);
        assert_eq!(order.total(), Some(Decimal::new(3500, 2)));
        assert_eq!(order_of(&[]).total(), Some(Decimal::ZERO));
    }

    #[test]
    fn total_is_none_when_it_leaves_decimal() {
        let order = order_of(&[(Decimal::MAX, i64::MAX)]);
        assert_eq!(order.total(), None);

        let order = order_of(&[(Decimal::MAX, 1), (Decimal::MAX, 1)]);
        assert_eq!(order.total(), None);
    }
}
