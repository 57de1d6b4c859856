//! [`ActorEntity`] implementation for [`Product`], including the stock actions.

use super::actions::{ProductAction, ProductActionResult};
use super::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use rust_decimal::Decimal;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn generate_id(_sequence: u64) -> ProductId {
        ProductId::new()
    }

    /// Rejects blank names, negative prices and negative opening stock.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(ProductError::EmptyName);
        }
        check_price(params.price)?;
        if params.quantity < 0 {
            return Err(ProductError::InvalidQuantity {
                product_id: id,
                quantity: params.quantity,
            });
        }
        Ok(Self::new(id, name, params.price, params.quantity))
    }

    /// Applies an update.
    ///
    /// `quantity` is written as given, negative values included: the unchecked
    /// decrement path relies on that.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            check_price(price)?;
        }
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ProductError::EmptyName);
            }
        }

        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(price) = update.price {
            self.price = price.round_dp(2);
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.quantity)),
            ProductAction::ReserveStock(amount) => {
                if amount < 0 {
                    return Err(ProductError::InvalidQuantity {
                        product_id: self.id,
                        quantity: amount,
                    });
                }
                if amount > self.quantity {
                    return Err(ProductError::InsufficientStock {
                        product_id: self.id,
                        requested: amount,
                        available: self.quantity,
                    });
                }
                if amount > 0 {
                    self.quantity -= amount;
                    self.updated_at = Utc::now();
                }
                Ok(ProductActionResult::ReserveStock(self.clone()))
            }
        }
    }
}

fn check_price(price: Decimal) -> Result<(), ProductError> {
    if price < Decimal::ZERO {
        return Err(ProductError::InvalidPrice(price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64) -> Product {
        Product::new(ProductId::new(), "Widget", Decimal::new(1000, 2), quantity)
    }

    #[test]
    fn create_rounds_price_to_cents() {
        let params = ProductCreate {
            name: "Widget".into(),
            price: Decimal::new(19999, 3), // 19.999
            quantity: 1,
        };
        let product = Product::from_create_params(ProductId::new(), params).unwrap();
        assert_eq!(product.price, Decimal::new(2000, 2));
    }

    #[test]
    fn create_rejects_negative_price_and_stock() {
        let negative_price = ProductCreate {
            name: "Widget".into(),
            price: Decimal::new(-1, 0),
            quantity: 1,
        };
        assert!(matches!(
            Product::from_create_params(ProductId::new(), negative_price),
            Err(ProductError::InvalidPrice(_))
        ));

        let negative_stock = ProductCreate {
            name: "Widget".into(),
            price: Decimal::ZERO,
            quantity: -1,
        };
        assert!(matches!(
            Product::from_create_params(ProductId::new(), negative_stock),
            Err(ProductError::InvalidQuantity { quantity: -1, .. })
        ));
    }

    #[tokio::test]
    async fn update_may_push_stock_below_zero() {
        let mut product = product(2);
        product
            .on_update(ProductUpdate::quantity(-3), &())
            .await
            .unwrap();
        assert_eq!(product.quantity, -3);
    }

    #[tokio::test]
    async fn reserve_takes_exactly_the_requested_amount() {
        let mut product = product(5);
        let result = product
            .handle_action(ProductAction::ReserveStock(3), &())
            .await
            .unwrap();
        match result {
            ProductActionResult::ReserveStock(after) => assert_eq!(after.quantity, 2),
            other => panic!("Expected ReserveStock result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reserve_refuses_to_oversell() {
        let mut product = product(5);
        let err = product
            .handle_action(ProductAction::ReserveStock(10), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                product_id: product.id,
                requested: 10,
                available: 5,
            }
        );
        assert_eq!(product.quantity, 5);
    }

    #[tokio::test]
    async fn reserve_zero_is_a_no_op_and_negative_is_rejected() {
        let mut product = product(5);
        product
            .handle_action(ProductAction::ReserveStock(0), &())
            .await
            .unwrap();
        assert_eq!(product.quantity, 5);

        let err = product
            .handle_action(ProductAction::ReserveStock(-1), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProductError::InvalidQuantity {
                product_id: product.id,
                quantity: -1,
            }
        );
    }
}
