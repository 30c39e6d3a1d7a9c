//! Explicit user actions on alerts: acknowledge, resolve, dismiss, annotate.

use chrono::{DateTime, Utc};

use stockflow_core::{AlertId, DomainError, DomainResult};

use crate::alert::{Alert, AlertStatus, StockStatus};

/// Partial update to an alert.
///
/// `notes` distinguishes "leave as is" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertPatch {
    pub status: Option<AlertStatus>,
    pub notes: Option<Option<String>>,
}

fn position(alerts: &[Alert], id: &AlertId) -> DomainResult<usize> {
    alerts
        .iter()
        .position(|a| &a.id == id)
        .ok_or_else(|| DomainError::not_found("Alert not found"))
}

/// Merge `patch` into the alert with `id` and return the updated copy.
///
/// `acknowledged_at` / `resolved_at` record the first transition into those
/// states only; repeating the transition does not move them.
pub fn update_alert(
    alerts: &mut [Alert],
    id: &AlertId,
    patch: AlertPatch,
    now: DateTime<Utc>,
) -> DomainResult<Alert> {
    let idx = position(alerts, id)?;
    let alert = &mut alerts[idx];

    if let Some(status) = patch.status {
        alert.status = status;
        if status == AlertStatus::Acknowledged && alert.acknowledged_at.is_none() {
            alert.acknowledged_at = Some(now);
        }
        if status == AlertStatus::Resolved && alert.resolved_at.is_none() {
            alert.resolved_at = Some(now);
        }
    }
    if let Some(notes) = patch.notes {
        alert.notes = notes;
    }
    alert.updated_at = now;

    Ok(alert.clone())
}

/// Soft delete: the record stays, marked `dismissed`.
pub fn dismiss_alert(
    alerts: &mut [Alert],
    id: &AlertId,
    now: DateTime<Utc>,
) -> DomainResult<Alert> {
    let idx = position(alerts, id)?;
    let alert = &mut alerts[idx];
    alert.status = AlertStatus::Dismissed;
    alert.updated_at = now;
    Ok(alert.clone())
}

/// Query over the alert list. All filters are optional and AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub status: Option<AlertStatus>,
    pub stock_status: Option<StockStatus>,
    pub product_id: Option<i64>,
}

impl AlertFilter {
    pub fn matches(&self, a: &Alert) -> bool {
        self.status.is_none_or(|s| a.status == s)
            && self.stock_status.is_none_or(|s| a.stock_status == s)
            && self.product_id.is_none_or(|p| a.product_id == p)
    }

    pub fn apply(&self, alerts: Vec<Alert>) -> Vec<Alert> {
        alerts.into_iter().filter(|a| self.matches(a)).collect()
    }
}
