//! Pure validation and pricing steps of the order workflow.
//!
//! Nothing here touches a store: every function takes the requested items and
//! the resolved catalog entries and returns a decision.

use super::CreateOrderError;
use crate::config::QuantityRule;
use crate::model::{OrderLineCreate, Product, ProductId, ProductQuantity};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Applies the configured rule to items with a zero or negative quantity.
pub fn apply_quantity_rule(
    items: &[ProductQuantity],
    rule: QuantityRule,
) -> Result<Vec<ProductQuantity>, CreateOrderError> {
    match rule {
        QuantityRule::AcceptAll => Ok(items.to_vec()),
        QuantityRule::DropNonPositive => Ok(items
            .iter()
            .filter(|item| item.quantity > 0)
            .copied()
            .collect()),
        QuantityRule::RejectNonPositive => match items.iter().find(|item| item.quantity <= 0) {
            Some(bad) => Err(CreateOrderError::InvalidQuantity {
                product_id: bad.product_id,
                quantity: bad.quantity,
            }),
            None => Ok(items.to_vec()),
        },
    }
}

/// Ids in order of first appearance, each once.
pub fn distinct_ids(items: &[ProductQuantity]) -> Vec<ProductId> {
    let mut ids: Vec<ProductId> = Vec::with_capacity(items.len());
    for item in items {
        if !ids.contains(&item.product_id) {
            ids.push(item.product_id);
        }
    }
    ids
}

/// Total requested quantity per product, in order of first appearance.
///
/// A total that does not fit in an `i64` fails with `InvalidQuantity` for the
/// item that pushed it over.
pub fn requested_totals(
    items: &[ProductQuantity],
) -> Result<Vec<ProductQuantity>, CreateOrderError> {
    let mut totals: Vec<ProductQuantity> = Vec::new();
    for item in items {
        match totals.iter_mut().find(|t| t.product_id == item.product_id) {
            Some(total) => {
                total.quantity = total.quantity.checked_add(item.quantity).ok_or(
                    CreateOrderError::InvalidQuantity {
                        product_id: item.product_id,
                        quantity: item.quantity,
                    },
                )?;
            }
            None => totals.push(*item),
        }
    }
    Ok(totals)
}

/// Fails on the first product whose total exceeds its stock. A product missing
/// from the catalog has no stock.
pub fn check_stock(
    totals: &[ProductQuantity],
    catalog: &HashMap<ProductId, Product>,
) -> Result<(), CreateOrderError> {
    for total in totals {
        let available = catalog
            .get(&total.product_id)
            .map(|product| product.quantity)
            .unwrap_or(0);
        if total.quantity > available {
            return Err(CreateOrderError::InsufficientStock {
                product_id: total.product_id,
                requested: total.quantity,
                available,
            });
        }
    }
    Ok(())
}

/// One line per requested item, in request order, priced from the catalog.
/// A product missing from the catalog is priced at zero.
pub fn build_lines(
    items: &[ProductQuantity],
    catalog: &HashMap<ProductId, Product>,
) -> Vec<OrderLineCreate> {
    items
        .iter()
        .map(|item| OrderLineCreate {
            product_id: item.product_id,
            price: catalog
                .get(&item.product_id)
                .map(|product| product.price)
                .unwrap_or(Decimal::ZERO),
            quantity: item.quantity,
        })
        .collect()
}
