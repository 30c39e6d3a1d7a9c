//! Stock alert domain module.
//!
//! Derives per-product stock health from the current ledgers and reconciles it
//! against the persisted alert list, keeping user-driven lifecycle state
//! (acknowledged/resolved/dismissed, notes) across regenerations.
//!
//! Pure logic only: callers supply the loaded collections and a clock reading.

pub mod alert;
pub mod classify;
pub mod lifecycle;
pub mod regenerate;

pub use alert::{Alert, AlertStatus, AlertWarehouse, StockStatus};
pub use classify::{classify_stock, recommend_reorder_quantity};
pub use lifecycle::{dismiss_alert, update_alert, AlertFilter, AlertPatch};
pub use regenerate::{regenerate_alerts, sort_by_severity};
