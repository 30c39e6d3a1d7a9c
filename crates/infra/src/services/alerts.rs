use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use stockflow_alerts::{
    dismiss_alert, regenerate_alerts, sort_by_severity, update_alert, Alert, AlertFilter,
    AlertPatch,
};
use stockflow_core::{find_by_id, AlertId, DomainError};

use super::{ServiceError, ServiceResult};
use crate::ledger::Ledger;

/// Stock-health alerts: regeneration and user lifecycle actions.
#[derive(Debug, Clone)]
pub struct AlertService {
    ledger: Arc<Ledger>,
}

impl AlertService {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Recompute alerts from current stock, persist, and return them sorted
    /// by severity.
    pub fn regenerate(&self) -> ServiceResult<Vec<Alert>> {
        let _gate = self.ledger.write_gate();

        let products = self.ledger.products.load_all()?;
        let warehouses = self.ledger.warehouses.load_all()?;
        let stock = self.ledger.stock.load_all()?;
        let existing = self.ledger.alerts.load_all()?;

        let mut alerts = regenerate_alerts(&products, &warehouses, &stock, &existing, Utc::now());
        self.ledger.alerts.replace_all(&alerts)?;

        info!(products = products.len(), alerts = alerts.len(), "alerts regenerated");

        sort_by_severity(&mut alerts);
        Ok(alerts)
    }

    /// Filtered, severity-sorted alerts; optionally regenerated first.
    pub fn list(&self, filter: &AlertFilter, regenerate: bool) -> ServiceResult<Vec<Alert>> {
        let alerts = if regenerate {
            self.regenerate()?
        } else {
            self.ledger.alerts.load_all()?
        };

        let mut alerts = filter.apply(alerts);
        sort_by_severity(&mut alerts);
        Ok(alerts)
    }

    pub fn get(&self, id: &AlertId) -> ServiceResult<Alert> {
        let alerts = self.ledger.alerts.load_all()?;
        find_by_id(&alerts, id)
            .cloned()
            .ok_or_else(|| ServiceError::Domain(DomainError::not_found("Alert not found")))
    }

    pub fn update(&self, id: &AlertId, patch: AlertPatch) -> ServiceResult<Alert> {
        let _gate = self.ledger.write_gate();

        let mut alerts = self.ledger.alerts.load_all()?;
        let updated = update_alert(&mut alerts, id, patch, Utc::now())?;
        self.ledger.alerts.replace_all(&alerts)?;

        info!(alert_id = %id, status = updated.status.as_str(), "alert updated");
        Ok(updated)
    }

    /// Soft delete: marks the alert dismissed and keeps it on file.
    pub fn dismiss(&self, id: &AlertId) -> ServiceResult<Alert> {
        let _gate = self.ledger.write_gate();

        let mut alerts = self.ledger.alerts.load_all()?;
        let dismissed = dismiss_alert(&mut alerts, id, Utc::now())?;
        self.ledger.alerts.replace_all(&alerts)?;

        info!(alert_id = %id, "alert dismissed");
        Ok(dismissed)
    }
}
