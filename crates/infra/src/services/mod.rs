//! Application services: load collections, run the pure engines, persist.
//!
//! ```text
//! request
//!   ↓
//! 1. validate input (no IO)
//!   ↓
//! 2. take the ledger write gate (mutating operations only)
//!   ↓
//! 3. load the collections involved
//!   ↓
//! 4. run the domain engine on in-memory copies
//!   ↓
//! 5. replace the mutated collections
//! ```

use thiserror::Error;

use stockflow_core::DomainError;

use crate::store::StoreError;

pub mod alerts;
pub mod transfers;

pub use alerts::AlertService;
pub use transfers::TransferService;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Deterministic rejection; nothing was written.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Underlying read/write failure. Not retried.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
