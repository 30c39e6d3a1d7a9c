//! Per-warehouse stock ledgers.
//!
//! The stock collection holds at most one record per `(product_id, warehouse_id)`
//! pair. Withdrawals that empty a record remove it instead of leaving a zero row.

use serde::{Deserialize, Serialize};

use stockflow_core::{next_local_id, DomainError, DomainResult, Entity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: i64,
}

impl Entity for StockRecord {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

fn position(stock: &[StockRecord], product_id: i64, warehouse_id: i64) -> Option<usize> {
    stock
        .iter()
        .position(|s| s.product_id == product_id && s.warehouse_id == warehouse_id)
}

/// Units of `product_id` held at `warehouse_id` (0 when there is no record).
pub fn quantity_at(stock: &[StockRecord], product_id: i64, warehouse_id: i64) -> i64 {
    position(stock, product_id, warehouse_id)
        .map(|i| stock[i].quantity)
        .unwrap_or(0)
}

/// Units of `product_id` across every warehouse, saturating at `i64::MAX`.
pub fn total_for_product(stock: &[StockRecord], product_id: i64) -> i64 {
    stock
        .iter()
        .filter(|s| s.product_id == product_id)
        .fold(0i64, |total, s| total.saturating_add(s.quantity))
}

/// Level a ledger would reach after receiving `quantity` units.
///
/// Fails with `StockLimitExceeded` when that level does not fit in an `i64`.
pub fn level_after_deposit(
    stock: &[StockRecord],
    product_id: i64,
    warehouse_id: i64,
    quantity: i64,
) -> DomainResult<i64> {
    let current = quantity_at(stock, product_id, warehouse_id);
    current
        .checked_add(quantity)
        .ok_or_else(|| DomainError::stock_limit_exceeded(current, quantity))
}

/// Take `quantity` units out of a ledger and return what is left there.
///
/// Fails with `InsufficientStock` before touching the collection when the
/// ledger holds fewer units than requested. A ledger that ends at or below
/// zero is removed from the collection.
pub fn withdraw(
    stock: &mut Vec<StockRecord>,
    product_id: i64,
    warehouse_id: i64,
    quantity: i64,
) -> DomainResult<i64> {
    let idx = position(stock, product_id, warehouse_id);
    let available = idx.map(|i| stock[i].quantity).unwrap_or(0);

    if available < quantity {
        return Err(DomainError::insufficient_stock(available, quantity));
    }

    let Some(i) = idx else {
        return Ok(0);
    };

    let remaining = available - quantity;
    if remaining > 0 {
        stock[i].quantity = remaining;
        Ok(remaining)
    } else {
        stock.remove(i);
        Ok(0)
    }
}

/// Add `quantity` units to a ledger, creating the record if needed, and return
/// the new level. The collection is left as it was on overflow.
pub fn deposit(
    stock: &mut Vec<StockRecord>,
    product_id: i64,
    warehouse_id: i64,
    quantity: i64,
) -> DomainResult<i64> {
    let level = level_after_deposit(stock, product_id, warehouse_id, quantity)?;
    match position(stock, product_id, warehouse_id) {
        Some(i) => stock[i].quantity = level,
        None => {
            let id = next_local_id(stock);
            stock.push(StockRecord {
                id,
                product_id,
                warehouse_id,
                quantity: level,
            });
        }
    }
    Ok(level)
}
