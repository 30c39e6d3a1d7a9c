//! Infrastructure layer: ledger storage and the services that drive the
//! transfer and alert engines against it.

pub mod ledger;
pub mod services;
pub mod store;


pub use ledger::{Ledger, LedgerSeed};
pub use services::{AlertService, ServiceError, ServiceResult, TransferService};
pub use store::{CollectionStore, InMemoryStore, JsonFileStore, StoreError};
