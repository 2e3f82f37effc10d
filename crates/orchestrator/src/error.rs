//! Orchestrator error types.

use common::OrderId;
use domain::OrderError;
use order_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the order service.
///
/// Event-sink failures are deliberately absent: a publish failure
/// after a durable state change is logged, never propagated, so it can
/// never unwind the committed transition.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// No order exists with the given ID.
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: OrderId },

    /// A validation or state error from the aggregate.
    #[error(transparent)]
    Domain(#[from] OrderError),

    /// A persistence failure, after retries where applicable.
    #[error(transparent)]
    Store(#[from] StoreError),
}
