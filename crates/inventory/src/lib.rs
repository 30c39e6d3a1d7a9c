//! Inventory domain module: catalogue, stock ledgers and the transfer engine.
//!
//! This crate contains business rules for moving stock between warehouses,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//! Callers load collections, hand them in, and persist whatever comes back.

pub mod catalog;
pub mod stock;
pub mod transfer;

pub use catalog::{Product, Warehouse};
pub use stock::StockRecord;
pub use transfer::{
    execute_transfer, list_transfers, StockSummary, Transfer, TransferDraft, TransferFilter,
    TransferMeta, TransferOutcome, TransferRequest, TransferStatus, WarehouseLevel,
    DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
