use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use stockflow_core::{find_by_id, DomainError, TransferId};
use stockflow_inventory::{
    execute_transfer, list_transfers, Transfer, TransferDraft, TransferFilter, TransferOutcome,
};

use super::{ServiceError, ServiceResult};
use crate::ledger::Ledger;

/// Stock transfers between warehouses and the transfer log.
#[derive(Debug, Clone)]
pub struct TransferService {
    ledger: Arc<Ledger>,
}

impl TransferService {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Validate and execute a transfer.
    ///
    /// Stock is persisted before the audit record is appended. If appending
    /// fails, the error is returned and the stock change stands.
    pub fn create(&self, draft: TransferDraft) -> ServiceResult<TransferOutcome> {
        let request = draft.validate().inspect_err(|e| warn!(error = %e, "transfer rejected"))?;

        let _gate = self.ledger.write_gate();

        let products = self.ledger.products.load_all()?;
        let warehouses = self.ledger.warehouses.load_all()?;
        let mut stock = self.ledger.stock.load_all()?;

        let outcome = execute_transfer(&request, &products, &warehouses, &mut stock, Utc::now())
            .inspect_err(|e| {
                warn!(
                    product_id = request.product_id,
                    from_warehouse_id = request.from_warehouse_id,
                    to_warehouse_id = request.to_warehouse_id,
                    quantity = request.quantity,
                    error = %e,
                    "transfer rejected"
                )
            })?;

        self.ledger.stock.replace_all(&stock)?;

        let mut log = self.ledger.transfers.load_all()?;
        log.push(outcome.transfer.clone());
        self.ledger.transfers.replace_all(&log).inspect_err(|e| {
            warn!(
                transfer_id = %outcome.transfer.id,
                error = %e,
                "stock updated but transfer not logged"
            )
        })?;

        info!(
            transfer_id = %outcome.transfer.id,
            product_id = request.product_id,
            from_warehouse_id = request.from_warehouse_id,
            to_warehouse_id = request.to_warehouse_id,
            quantity = request.quantity,
            "transfer completed"
        );

        Ok(outcome)
    }

    pub fn list(&self, filter: &TransferFilter) -> ServiceResult<Vec<Transfer>> {
        Ok(list_transfers(self.ledger.transfers.load_all()?, filter))
    }

    pub fn get(&self, id: &TransferId) -> ServiceResult<Transfer> {
        let log = self.ledger.transfers.load_all()?;
        find_by_id(&log, id)
            .cloned()
            .ok_or_else(|| ServiceError::Domain(DomainError::not_found("Transfer not found")))
    }
}
