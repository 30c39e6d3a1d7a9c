use serde::{Deserialize, Deserializer};
use serde_json::Value;

use stockflow_alerts::{AlertFilter, AlertPatch, AlertStatus, StockStatus};
use stockflow_core::DomainError;
use stockflow_inventory::{TransferDraft, TransferFilter, TransferStatus};

// -------------------------
// Request DTOs
// -------------------------

/// Raw transfer body. Fields stay untyped so a wrong type becomes a field
/// error instead of a rejected body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferRequest {
    pub product_id: Option<Value>,
    pub from_warehouse_id: Option<Value>,
    pub to_warehouse_id: Option<Value>,
    pub quantity: Option<Value>,
    pub note: Option<Value>,
}

impl CreateTransferRequest {
    pub fn into_draft(self) -> TransferDraft {
        TransferDraft {
            product_id: integer(self.product_id.as_ref()),
            from_warehouse_id: integer(self.from_warehouse_id.as_ref()),
            to_warehouse_id: integer(self.to_warehouse_id.as_ref()),
            quantity: integer(self.quantity.as_ref()),
            note: match self.note {
                Some(Value::String(s)) => Some(s),
                _ => None,
            },
        }
    }
}

/// JSON numbers with no fractional part, `5.0` included. Strings are not
/// coerced.
fn integer(v: Option<&Value>) -> Option<i64> {
    let Value::Number(n) = v? else {
        return None;
    };
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAlertRequest {
    #[serde(default)]
    pub status: Option<String>,
    /// Absent leaves notes alone; `null` clears them.
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateAlertRequest {
    pub fn into_patch(self) -> Result<AlertPatch, DomainError> {
        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(AlertStatus::parse(raw).ok_or_else(|| {
                DomainError::field(
                    "status",
                    "Status must be one of: active, acknowledged, resolved, dismissed",
                )
            })?),
        };

        Ok(AlertPatch {
            status,
            notes: self.notes,
        })
    }
}

// -------------------------
// Query parameters
// -------------------------

/// A query value was present but could not be parsed; the listing is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchesNothing;

/// `Ok(None)` for absent or empty values.
fn param<T>(
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>, MatchesNothing> {
    match raw.filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse(s).map(Some).ok_or(MatchesNothing),
    }
}

fn parse_id(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferListQuery {
    pub warehouse_id: Option<String>,
    pub product_id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<String>,
}

impl TransferListQuery {
    pub fn to_filter(&self) -> Result<TransferFilter, MatchesNothing> {
        let limit = self.limit.as_deref().and_then(parse_id);
        Ok(TransferFilter {
            warehouse_id: param(self.warehouse_id.as_deref(), parse_id)?,
            product_id: param(self.product_id.as_deref(), parse_id)?,
            status: param(self.status.as_deref(), TransferStatus::parse)?,
            limit: TransferFilter::clamp_limit(limit),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertListQuery {
    pub status: Option<String>,
    pub stock_status: Option<String>,
    pub product_id: Option<String>,
    pub regenerate: Option<String>,
}

impl AlertListQuery {
    pub fn to_filter(&self) -> Result<AlertFilter, MatchesNothing> {
        Ok(AlertFilter {
            status: param(self.status.as_deref(), AlertStatus::parse)?,
            stock_status: param(self.stock_status.as_deref(), StockStatus::parse)?,
            product_id: param(self.product_id.as_deref(), parse_id)?,
        })
    }

    pub fn regenerate(&self) -> bool {
        self.regenerate.as_deref() == Some("true")
    }
}
