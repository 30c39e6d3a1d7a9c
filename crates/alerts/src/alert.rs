use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockflow_core::{AlertId, Entity};

/// Stock health of a product, summed across warehouses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Adequate,
    Overstocked,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Critical => "critical",
            StockStatus::Low => "low",
            StockStatus::Adequate => "adequate",
            StockStatus::Overstocked => "overstocked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "critical" => Some(StockStatus::Critical),
            "low" => Some(StockStatus::Low),
            "adequate" => Some(StockStatus::Adequate),
            "overstocked" => Some(StockStatus::Overstocked),
            _ => None,
        }
    }

    /// Presentation order: critical first, overstocked last.
    pub fn priority(&self) -> u8 {
        match self {
            StockStatus::Critical => 0,
            StockStatus::Low => 1,
            StockStatus::Overstocked => 2,
            StockStatus::Adequate => 3,
        }
    }

    /// Whether this status warrants an alert at all.
    pub fn is_alerting(&self) -> bool {
        !matches!(self, StockStatus::Adequate)
    }
}

/// User-driven alert lifecycle.
///
/// `Active` is the initial state; `Resolved` and `Dismissed` are terminal by
/// convention (updates do not forbid re-activation).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
    Dismissed,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Dismissed => "dismissed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(AlertStatus::Active),
            "acknowledged" => Some(AlertStatus::Acknowledged),
            "resolved" => Some(AlertStatus::Resolved),
            "dismissed" => Some(AlertStatus::Dismissed),
            _ => None,
        }
    }

    /// Closed alerts are no longer tracked by regeneration.
    pub fn is_closed(&self) -> bool {
        matches!(self, AlertStatus::Resolved | AlertStatus::Dismissed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertWarehouse {
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub warehouse_code: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: AlertId,
    pub product_id: i64,
    pub product_name: String,
    pub product_sku: String,
    pub product_category: String,
    pub reorder_point: i64,
    pub current_stock: i64,
    pub stock_status: StockStatus,
    pub recommended_reorder_quantity: i64,
    pub warehouses: Vec<AlertWarehouse>,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl Entity for Alert {
    type Id = AlertId;

    fn id(&self) -> &AlertId {
        &self.id
    }
}
