//! Transfer engine: moves units of one product between two warehouse ledgers.
//!
//! The engine works on in-memory copies of the collections. It either fails
//! without touching anything, or returns the mutated stock collection (through
//! `&mut`) together with the audit record to append. Persisting both, stock
//! first, is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockflow_core::{find_by_id, DomainError, DomainResult, Entity, FieldError, TransferId};

use crate::catalog::{Product, Warehouse};
use crate::stock::{self, StockRecord};

/// Default page size for [`list_transfers`].
pub const DEFAULT_LIST_LIMIT: usize = 50;
/// Hard ceiling for [`list_transfers`], whatever the caller asks for.
pub const MAX_LIST_LIMIT: usize = 200;

const SYSTEM_ACTOR: &str = "system";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Completed,
    Failed,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Completed => "completed",
            TransferStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(TransferStatus::Completed),
            "failed" => Some(TransferStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMeta {
    pub reason: Option<String>,
    pub reference_no: Option<String>,
}

/// Immutable audit entry for a stock movement.
///
/// Product and warehouse names are copied in at creation time so history
/// still reads correctly after the catalogue is renamed or pruned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: TransferId,
    pub created_at: DateTime<Utc>,
    pub status: TransferStatus,
    pub product_id: i64,
    pub from_warehouse_id: i64,
    pub to_warehouse_id: i64,
    pub quantity: i64,
    pub note: Option<String>,
    #[serde(default = "system_actor")]
    pub created_by: String,
    pub product_name: String,
    pub from_warehouse_name: String,
    pub to_warehouse_name: String,
    #[serde(default)]
    pub meta: TransferMeta,
}

fn system_actor() -> String {
    SYSTEM_ACTOR.to_string()
}

impl Entity for Transfer {
    type Id = TransferId;

    fn id(&self) -> &TransferId {
        &self.id
    }
}

/// Transfer request as received from a caller.
///
/// Each id field is `None` when it was missing or not an integer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDraft {
    pub product_id: Option<i64>,
    pub from_warehouse_id: Option<i64>,
    pub to_warehouse_id: Option<i64>,
    pub quantity: Option<i64>,
    pub note: Option<String>,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub product_id: i64,
    pub from_warehouse_id: i64,
    pub to_warehouse_id: i64,
    pub quantity: i64,
    pub note: Option<String>,
}

impl TransferDraft {
    /// Check every field and report all violations at once.
    pub fn validate(self) -> DomainResult<TransferRequest> {
        let mut errors = Vec::new();

        let product_id = present(self.product_id);
        if product_id.is_none() {
            errors.push(FieldError::new(
                "productId",
                "Product ID is required and must be a number",
            ));
        }

        let from_warehouse_id = present(self.from_warehouse_id);
        if from_warehouse_id.is_none() {
            errors.push(FieldError::new(
                "fromWarehouseId",
                "From warehouse ID is required and must be a number",
            ));
        }

        let to_warehouse_id = present(self.to_warehouse_id);
        if to_warehouse_id.is_none() {
            errors.push(FieldError::new(
                "toWarehouseId",
                "To warehouse ID is required and must be a number",
            ));
        }

        let quantity = positive(self.quantity);
        if quantity.is_none() {
            errors.push(FieldError::new("quantity", "Quantity must be a positive integer"));
        }

        if let (Some(from), Some(to)) = (from_warehouse_id, to_warehouse_id) {
            if from == to {
                errors.push(FieldError::new(
                    "toWarehouseId",
                    "From and To warehouses must be different",
                ));
            }
        }

        match (product_id, from_warehouse_id, to_warehouse_id, quantity) {
            (Some(product_id), Some(from_warehouse_id), Some(to_warehouse_id), Some(quantity))
                if errors.is_empty() =>
            {
                Ok(TransferRequest {
                    product_id,
                    from_warehouse_id,
                    to_warehouse_id,
                    quantity,
                    note: self.note.filter(|n| !n.is_empty()),
                })
            }
            _ => Err(DomainError::validation(errors)),
        }
    }
}

/// Ids only need to be present and non-zero; a negative id fails the
/// existence check later.
fn present(v: Option<i64>) -> Option<i64> {
    v.filter(|n| *n != 0)
}

fn positive(v: Option<i64>) -> Option<i64> {
    v.filter(|n| *n > 0)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseLevel {
    pub warehouse_id: i64,
    pub new_quantity: i64,
}

/// Post-transfer levels at both ends of the movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub from_warehouse: WarehouseLevel,
    pub to_warehouse: WarehouseLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcome {
    pub transfer: Transfer,
    pub stock_summary: StockSummary,
}

/// Apply a validated transfer to the in-memory stock collection.
///
/// Checks run in order: product exists, source warehouse exists, destination
/// warehouse exists, destination has room, source holds enough units. `stock`
/// is only modified when all of them pass.
pub fn execute_transfer(
    request: &TransferRequest,
    products: &[Product],
    warehouses: &[Warehouse],
    stock: &mut Vec<StockRecord>,
    now: DateTime<Utc>,
) -> DomainResult<TransferOutcome> {
    let product = find_by_id(products, &request.product_id)
        .ok_or(DomainError::ProductNotFound(request.product_id))?;
    let from = find_by_id(warehouses, &request.from_warehouse_id)
        .ok_or(DomainError::SourceWarehouseNotFound(request.from_warehouse_id))?;
    let to = find_by_id(warehouses, &request.to_warehouse_id)
        .ok_or(DomainError::DestinationWarehouseNotFound(request.to_warehouse_id))?;

    // Checked up front so an overflowing destination fails before the
    // withdrawal mutates anything.
    stock::level_after_deposit(
        stock,
        request.product_id,
        request.to_warehouse_id,
        request.quantity,
    )?;

    let from_level = stock::withdraw(
        stock,
        request.product_id,
        request.from_warehouse_id,
        request.quantity,
    )?;
    let to_level = stock::deposit(
        stock,
        request.product_id,
        request.to_warehouse_id,
        request.quantity,
    )?;

    let transfer = Transfer {
        id: TransferId::new(),
        created_at: now,
        status: TransferStatus::Completed,
        product_id: request.product_id,
        from_warehouse_id: request.from_warehouse_id,
        to_warehouse_id: request.to_warehouse_id,
        quantity: request.quantity,
        note: request.note.clone(),
        created_by: system_actor(),
        product_name: product.name.clone(),
        from_warehouse_name: from.name.clone(),
        to_warehouse_name: to.name.clone(),
        meta: TransferMeta {
            reason: request.note.clone(),
            reference_no: None,
        },
    };

    Ok(TransferOutcome {
        transfer,
        stock_summary: StockSummary {
            from_warehouse: WarehouseLevel {
                warehouse_id: request.from_warehouse_id,
                new_quantity: from_level,
            },
            to_warehouse: WarehouseLevel {
                warehouse_id: request.to_warehouse_id,
                new_quantity: to_level,
            },
        },
    })
}

/// Query over the transfer log. All filters are optional and AND-combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFilter {
    /// Matches either end of the movement.
    pub warehouse_id: Option<i64>,
    pub product_id: Option<i64>,
    pub status: Option<TransferStatus>,
    pub limit: usize,
}

impl Default for TransferFilter {
    fn default() -> Self {
        Self {
            warehouse_id: None,
            product_id: None,
            status: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl TransferFilter {
    /// Normalise a caller-supplied limit: non-positive or absent falls back to
    /// the default, anything above the ceiling is capped.
    pub fn clamp_limit(requested: Option<i64>) -> usize {
        match requested {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(MAX_LIST_LIMIT).min(MAX_LIST_LIMIT),
            _ => DEFAULT_LIST_LIMIT,
        }
    }

    pub fn matches(&self, t: &Transfer) -> bool {
        if let Some(w) = self.warehouse_id {
            if t.from_warehouse_id != w && t.to_warehouse_id != w {
                return false;
            }
        }
        if let Some(p) = self.product_id {
            if t.product_id != p {
                return false;
            }
        }
        if let Some(s) = self.status {
            if t.status != s {
                return false;
            }
        }
        true
    }
}

/// Filter, sort newest-first (stable on ties) and truncate.
pub fn list_transfers(transfers: Vec<Transfer>, filter: &TransferFilter) -> Vec<Transfer> {
    let mut out: Vec<Transfer> = transfers.into_iter().filter(|t| filter.matches(t)).collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out.truncate(filter.limit.min(MAX_LIST_LIMIT));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn products() -> Vec<Product> {
        vec![Product {
            id: 1,
            sku: "WID-001".to_string(),
            name: "Widget".to_string(),
            category: "Parts".to_string(),
            unit_cost: 2.5,
            reorder_point: 100,
        }]
    }

    fn warehouses() -> Vec<Warehouse> {
        vec![
            Warehouse {
                id: 1,
                code: "NORTH".to_string(),
                name: "North Hub".to_string(),
                location: "Oslo".to_string(),
            },
            Warehouse {
                id: 2,
                code: "SOUTH".to_string(),
                name: "South Depot".to_string(),
                location: "Bergen".to_string(),
            },
        ]
    }

    fn rec(id: i64, product_id: i64, warehouse_id: i64, quantity: i64) -> StockRecord {
        StockRecord {
            id,
            product_id,
            warehouse_id,
            quantity,
        }
    }

    fn stock() -> Vec<StockRecord> {
        vec![rec(1, 1, 1, 250), rec(2, 1, 2, 150)]
    }

    fn draft(product: i64, from: i64, to: i64, qty: i64) -> TransferDraft {
        TransferDraft {
            product_id: Some(product),
            from_warehouse_id: Some(from),
            to_warehouse_id: Some(to),
            quantity: Some(qty),
            note: None,
        }
    }

    fn fields(err: DomainError) -> Vec<String> {
        match err {
            DomainError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validation_collects_every_violation() {
        let err = TransferDraft::default().validate().unwrap_err();
        assert_eq!(
            fields(err),
            vec!["productId", "fromWarehouseId", "toWarehouseId", "quantity"]
        );
    }

    #[test]
    fn validation_rejects_same_warehouse_and_bad_quantity_together() {
        let err = draft(1, 2, 2, -3).validate().unwrap_err();
        assert_eq!(fields(err), vec!["quantity", "toWarehouseId"]);
    }

    #[test]
    fn validation_messages_are_specific() {
        let err = draft(1, 1, 1, 0).validate().unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.contains(&FieldError::new(
            "quantity",
            "Quantity must be a positive integer"
        )));
        assert!(errors.contains(&FieldError::new(
            "toWarehouseId",
            "From and To warehouses must be different"
        )));
    }

    #[test]
    fn empty_note_becomes_none() {
        let mut d = draft(1, 1, 2, 5);
        d.note = Some(String::new());
        assert_eq!(d.validate().unwrap().note, None);
    }

    #[test]
    fn moves_units_between_existing_ledgers() {
        let mut s = stock();
        let req = draft(1, 1, 2, 50).validate().unwrap();
        let out = execute_transfer(&req, &products(), &warehouses(), &mut s, test_time()).unwrap();

        assert_eq!(stock::quantity_at(&s, 1, 1), 200);
        assert_eq!(stock::quantity_at(&s, 1, 2), 200);
        assert_eq!(out.transfer.quantity, 50);
        assert_eq!(out.transfer.status, TransferStatus::Completed);
        assert_eq!(out.transfer.product_name, "Widget");
        assert_eq!(out.transfer.from_warehouse_name, "North Hub");
        assert_eq!(out.transfer.to_warehouse_name, "South Depot");
        assert_eq!(out.transfer.created_by, "system");
        assert_eq!(out.stock_summary.from_warehouse.new_quantity, 200);
        assert_eq!(out.stock_summary.to_warehouse.new_quantity, 200);
    }

    #[test]
    fn draining_the_source_prunes_its_record() {
        let mut s = stock();
        let req = draft(1, 2, 1, 150).validate().unwrap();
        let out = execute_transfer(&req, &products(), &warehouses(), &mut s, test_time()).unwrap();

        assert!(!s.iter().any(|r| r.product_id == 1 && r.warehouse_id == 2));
        assert_eq!(out.stock_summary.from_warehouse.new_quantity, 0);
        assert_eq!(out.stock_summary.to_warehouse.new_quantity, 400);
    }

    #[test]
    fn insufficient_stock_reports_available_and_requested() {
        let mut s = stock();
        let before = s.clone();
        let req = draft(1, 2, 1, 10_000).validate().unwrap();
        let err = execute_transfer(&req, &products(), &warehouses(), &mut s, test_time())
            .unwrap_err();

        assert_eq!(err, DomainError::insufficient_stock(150, 10_000));
        assert_eq!(s, before);
    }

    #[test]
    fn missing_references_are_not_found_in_order() {
        let mut s = stock();
        let before = s.clone();

        let err = execute_transfer(
            &draft(9, 7, 8, 1).validate().unwrap(),
            &products(),
            &warehouses(),
            &mut s,
            test_time(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::ProductNotFound(9));
        assert_eq!(err.to_string(), "Product with ID 9 not found");

        let err = execute_transfer(
            &draft(1, 7, 2, 1).validate().unwrap(),
            &products(),
            &warehouses(),
            &mut s,
            test_time(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::SourceWarehouseNotFound(7));

        let err = execute_transfer(
            &draft(1, 1, 8, 1).validate().unwrap(),
            &products(),
            &warehouses(),
            &mut s,
            test_time(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::DestinationWarehouseNotFound(8));
        assert!(err.is_not_found());

        assert_eq!(s, before);
    }

    #[test]
    fn negative_ids_pass_validation_and_fail_lookup() {
        let req = draft(-1, 1, 2, 5).validate().unwrap();
        assert_eq!(req.product_id, -1);

        let mut s = stock();
        let before = s.clone();
        let run = |req: TransferRequest, s: &mut Vec<StockRecord>| {
            execute_transfer(&req, &products(), &warehouses(), s, test_time()).unwrap_err()
        };

        let err = run(draft(-1, 1, 2, 5).validate().unwrap(), &mut s);
        assert_eq!(err, DomainError::ProductNotFound(-1));

        let err = run(draft(1, -1, 2, 5).validate().unwrap(), &mut s);
        assert_eq!(err, DomainError::SourceWarehouseNotFound(-1));

        let err = run(draft(1, 1, -2, 5).validate().unwrap(), &mut s);
        assert_eq!(err, DomainError::DestinationWarehouseNotFound(-2));

        assert_eq!(s, before);
    }

    #[test]
    fn zero_ids_still_count_as_missing() {
        let err = draft(0, 0, 0, 5).validate().unwrap_err();
        assert_eq!(fields(err), vec!["productId", "fromWarehouseId", "toWarehouseId"]);
    }

    #[test]
    fn overflowing_destination_is_rejected_without_side_effects() {
        let big = 5_000_000_000_000_000_000;
        let mut s = vec![rec(1, 1, 1, big), rec(2, 1, 2, big)];
        let before = s.clone();

        let req = draft(1, 1, 2, big).validate().unwrap();
        let err = execute_transfer(&req, &products(), &warehouses(), &mut s, test_time())
            .unwrap_err();

        assert_eq!(err, DomainError::stock_limit_exceeded(big, big));
        assert_eq!(s, before);
    }

    #[test]
    fn transfer_serializes_with_camel_case_fields() {
        let mut s = stock();
        let mut d = draft(1, 1, 2, 5);
        d.note = Some("rebalance".to_string());
        let req = d.validate().unwrap();
        let out = execute_transfer(&req, &products(), &warehouses(), &mut s, test_time()).unwrap();
        let json = serde_json::to_value(&out).unwrap();

        assert_eq!(json["transfer"]["fromWarehouseId"], 1);
        assert_eq!(json["transfer"]["status"], "completed");
        assert_eq!(json["transfer"]["meta"]["reason"], "rebalance");
        assert!(json["transfer"]["meta"]["referenceNo"].is_null());
        assert_eq!(json["stockSummary"]["toWarehouse"]["newQuantity"], 155);
    }

    #[test]
    fn legacy_records_without_created_by_still_load() {
        let json = serde_json::json!({
            "id": TransferId::new().to_string(),
            "createdAt": "2024-01-01T00:00:00.000Z",
            "status": "completed",
            "productId": 1,
            "fromWarehouseId": 1,
            "toWarehouseId": 2,
            "quantity": 3,
            "note": null,
            "productName": "Widget",
            "fromWarehouseName": "North Hub",
            "toWarehouseName": "South Depot"
        });
        let t: Transfer = serde_json::from_value(json).unwrap();
        assert_eq!(t.created_by, "system");
        assert_eq!(t.meta, TransferMeta::default());
    }

    fn logged(n: usize) -> Vec<Transfer> {
        (0..n)
            .map(|i| Transfer {
                id: TransferId::new(),
                created_at: test_time() + Duration::minutes(i as i64),
                status: if i % 5 == 0 { TransferStatus::Failed } else { TransferStatus::Completed },
                product_id: (i % 3) as i64 + 1,
                from_warehouse_id: (i % 4) as i64 + 1,
                to_warehouse_id: (i % 4) as i64 + 2,
                quantity: 1,
                note: None,
                created_by: system_actor(),
                product_name: String::new(),
                from_warehouse_name: String::new(),
                to_warehouse_name: String::new(),
                meta: TransferMeta::default(),
            })
            .collect()
    }

    #[test]
    fn warehouse_filter_matches_either_end() {
        let all = logged(40);
        let filter = TransferFilter {
            warehouse_id: Some(2),
            limit: MAX_LIST_LIMIT,
            ..Default::default()
        };
        let got = list_transfers(all.clone(), &filter);

        let expected = all
            .iter()
            .filter(|t| t.from_warehouse_id == 2 || t.to_warehouse_id == 2)
            .count();
        assert_eq!(got.len(), expected);
        assert!(got.iter().all(|t| t.from_warehouse_id == 2 || t.to_warehouse_id == 2));
    }

    #[test]
    fn filters_combine_and_sort_newest_first() {
        let filter = TransferFilter {
            product_id: Some(1),
            status: Some(TransferStatus::Completed),
            ..Default::default()
        };
        let got = list_transfers(logged(30), &filter);

        assert!(!got.is_empty());
        assert!(got.iter().all(|t| t.product_id == 1 && t.status == TransferStatus::Completed));
        assert!(got.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut all = logged(3);
        for t in &mut all {
            t.created_at = test_time();
        }
        let ids: Vec<_> = all.iter().map(|t| t.id).collect();
        let got = list_transfers(all, &TransferFilter::default());
        assert_eq!(got.iter().map(|t| t.id).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn limit_is_capped_and_defaulted() {
        assert_eq!(TransferFilter::clamp_limit(Some(500)), MAX_LIST_LIMIT);
        assert_eq!(TransferFilter::clamp_limit(Some(0)), DEFAULT_LIST_LIMIT);
        assert_eq!(TransferFilter::clamp_limit(Some(-4)), DEFAULT_LIST_LIMIT);
        assert_eq!(TransferFilter::clamp_limit(None), DEFAULT_LIST_LIMIT);
        assert_eq!(TransferFilter::clamp_limit(Some(7)), 7);

        let filter = TransferFilter {
            limit: TransferFilter::clamp_limit(Some(500)),
            ..Default::default()
        };
        assert_eq!(list_transfers(logged(250), &filter).len(), 200);
        assert_eq!(list_transfers(logged(250), &TransferFilter::default()).len(), 50);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: units are conserved and nothing goes negative.
            #[test]
            fn transfers_conserve_units(
                source in 1i64..500,
                dest in proptest::option::of(1i64..500),
                qty in 1i64..600,
            ) {
                let mut s = vec![rec(1, 1, 1, source)];
                if let Some(d) = dest {
                    s.push(rec(2, 1, 2, d));
                }
                let before = s.clone();
                let dest_before = dest.unwrap_or(0);

                let req = draft(1, 1, 2, qty).validate().unwrap();
                let result =
                    execute_transfer(&req, &products(), &warehouses(), &mut s, test_time());

                match result {
                    Ok(out) => {
                        let src_after = stock::quantity_at(&s, 1, 1);
                        let dst_after = stock::quantity_at(&s, 1, 2);
                        prop_assert_eq!(src_after, source - qty);
                        prop_assert_eq!(dst_after, dest_before + qty);
                        prop_assert_eq!(src_after + dst_after, source + dest_before);
                        prop_assert_eq!(out.stock_summary.from_warehouse.new_quantity, src_after);
                        prop_assert_eq!(out.stock_summary.to_warehouse.new_quantity, dst_after);
                        if src_after == 0 {
                            prop_assert!(!s.iter().any(|r| r.warehouse_id == 1));
                        }
                    }
                    Err(e) => {
                        prop_assert_eq!(e, DomainError::insufficient_stock(source, qty));
                        prop_assert_eq!(&s, &before);
                    }
                }
                prop_assert!(s.iter().all(|r| r.quantity > 0));
            }
        }
    }
}
