use std::collections::HashMap;

use chrono::{DateTime, Utc};

use stockflow_core::{find_by_id, AlertId};
use stockflow_inventory::stock::total_for_product;
use stockflow_inventory::{Product, StockRecord, Warehouse};

use crate::alert::{Alert, AlertStatus, AlertWarehouse, StockStatus};
use crate::classify::{classify_stock, recommend_reorder_quantity};

/// Recompute the alert list from current stock.
///
/// Returns one alert per non-adequate product, in product order. An open
/// (not resolved/dismissed) alert whose stock status is unchanged is carried
/// over untouched. An open alert whose status changed keeps its identity and
/// lifecycle fields but gets fresh figures. Closed alerts are dropped; a
/// product that is still out of band gets a brand new alert.
pub fn regenerate_alerts(
    products: &[Product],
    warehouses: &[Warehouse],
    stock: &[StockRecord],
    existing: &[Alert],
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let mut open: HashMap<i64, &Alert> = HashMap::new();
    for alert in existing.iter().filter(|a| !a.status.is_closed()) {
        open.insert(alert.product_id, alert);
    }

    let mut alerts = Vec::new();

    for product in products {
        let total = total_for_product(stock, product.id);
        let stock_status = classify_stock(total, product.reorder_point);

        if !stock_status.is_alerting() {
            continue;
        }

        let previous = open.get(&product.id).copied();

        if let Some(prev) = previous {
            if prev.stock_status == stock_status {
                alerts.push(prev.clone());
                continue;
            }
        }

        let recommended = match stock_status {
            StockStatus::Overstocked => 0,
            _ => recommend_reorder_quantity(total, product.reorder_point),
        };

        alerts.push(Alert {
            id: previous.map(|p| p.id).unwrap_or_else(AlertId::new),
            product_id: product.id,
            product_name: product.name.clone(),
            product_sku: product.sku.clone(),
            product_category: product.category.clone(),
            reorder_point: product.reorder_point,
            current_stock: total,
            stock_status,
            recommended_reorder_quantity: recommended,
            warehouses: breakdown(stock, product.id, warehouses),
            status: previous.map(|p| p.status).unwrap_or(AlertStatus::Active),
            created_at: previous.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
            acknowledged_at: previous.and_then(|p| p.acknowledged_at),
            resolved_at: previous.and_then(|p| p.resolved_at),
            notes: previous.and_then(|p| p.notes.clone()),
        });
    }

    alerts
}

fn breakdown(
    stock: &[StockRecord],
    product_id: i64,
    warehouses: &[Warehouse],
) -> Vec<AlertWarehouse> {
    stock
        .iter()
        .filter(|s| s.product_id == product_id)
        .map(|s| {
            let warehouse = find_by_id(warehouses, &s.warehouse_id);
            AlertWarehouse {
                warehouse_id: s.warehouse_id,
                warehouse_name: warehouse
                    .map(|w| w.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                warehouse_code: warehouse.map(|w| w.code.clone()).unwrap_or_default(),
                quantity: s.quantity,
            }
        })
        .collect()
}

/// Presentation order: severity first, then lowest stock first. Stable.
pub fn sort_by_severity(alerts: &mut [Alert]) {
    alerts.sort_by_key(|a| (a.stock_status.priority(), a.current_stock));
}
