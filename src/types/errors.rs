//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

use crate::types::OrderId;
use crate::validation::ValidationErrors;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the kitchen.
#[derive(Error, Debug)]
pub enum Error {
    /// Order failed admission validation. Carries one entry per violated
    /// field; the top-level message is the aggregate count.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// No tier currently holds the order: never admitted, already picked
    /// up, or discarded.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The order was located and removed, but its remaining freshness was
    /// exhausted. It is not returned to any tier.
    #[error("order expired: {0}")]
    Expired(OrderId),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn not_found(id: impl Into<OrderId>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn expired(id: impl Into<OrderId>) -> Self {
        Self::Expired(id.into())
    }
}

impl Error {
    /// True for the two non-delivery outcomes of a pickup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Error::Expired(_))
    }
}
