//! Store error types.

use common::OrderId;
use thiserror::Error;

use crate::repository::Version;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No order exists with the given ID.
    #[error("Order not found: {order_id}")]
    NotFound { order_id: OrderId },

    /// Optimistic concurrency check failed on save.
    #[error("Concurrency conflict for order {order_id}: expected version {expected}, actual {actual}")]
    VersionConflict {
        order_id: OrderId,
        expected: Version,
        actual: Version,
    },

    /// The store is temporarily unavailable.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Failed to (de)serialize an order for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns true if the error is transient and the operation may be
    /// retried. Conflicts and missing orders are never transient: the
    /// caller must re-read and decide.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
