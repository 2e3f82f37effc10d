//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Legal transitions:
/// ```text
/// Created ──┬──► Paid ──┬──► Shipped
///           │           │
///           └───────────┴──► Cancelled
/// ```
///
/// Shipped and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order has been created and awaits payment.
    #[default]
    Created,

    /// Payment has been confirmed.
    Paid,

    /// Order has been handed to shipping (terminal state).
    Shipped,

    /// Order was cancelled (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the transition from `self` to `target` is a legal
    /// edge of the state machine.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        matches!(
            (self, target),
            (OrderStatus::Created, OrderStatus::Paid)
                | (OrderStatus::Created, OrderStatus::Cancelled)
                | (OrderStatus::Paid, OrderStatus::Shipped)
                | (OrderStatus::Paid, OrderStatus::Cancelled)
        )
    }

    /// Returns true if this is a terminal status (no outgoing transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Paid => "Paid",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
