//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. None of these
/// variants are produced after state has been mutated; storage failures belong
/// to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed, missing or contradictory input. Carries every violation found.
    #[error("validation failed ({} field error(s))", .0.len())]
    Validation(Vec<FieldError>),

    /// A record looked up by id does not exist. The message is user-facing.
    #[error("{0}")]
    NotFound(String),

    #[error("Product with ID {0} not found")]
    ProductNotFound(i64),

    #[error("From warehouse with ID {0} not found")]
    SourceWarehouseNotFound(i64),

    #[error("To warehouse with ID {0} not found")]
    DestinationWarehouseNotFound(i64),

    /// The source ledger does not hold enough units for the request.
    #[error("insufficient stock (available: {available}, requested: {requested})")]
    InsufficientStock { available: i64, requested: i64 },

    /// Adding the units would push a ledger past the largest storable level.
    #[error("stock level limit exceeded (current: {current}, adding: {adding})")]
    StockLimitExceeded { current: i64, adding: i64 },
}

impl DomainError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn insufficient_stock(available: i64, requested: i64) -> Self {
        Self::InsufficientStock {
            available,
            requested,
        }
    }

    pub fn stock_limit_exceeded(current: i64, adding: i64) -> Self {
        Self::StockLimitExceeded { current, adding }
    }

    /// True for every "referenced record does not exist" variant.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::ProductNotFound(_)
                | Self::SourceWarehouseNotFound(_)
                | Self::DestinationWarehouseNotFound(_)
        )
    }
}
