//! Shared building blocks for the stockflow ledger domain.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{find_by_id, next_local_id, Entity};
pub use error::{DomainError, DomainResult, FieldError};
pub use id::{AlertId, TransferId};
