//! Order domain events.
//!
//! Each event is an immutable record of a fact that already happened,
//! carrying the minimal data a downstream consumer needs.

use chrono::{DateTime, Utc};
use common::{EventId, OrderId};
use serde::{Deserialize, Serialize};

use super::{CustomerId, Money};

/// Common behavior of domain events.
pub trait DomainEvent {
    /// Returns the event type name for routing and logging.
    fn event_type(&self) -> &'static str;

    /// Returns the unique ID of this event occurrence.
    fn event_id(&self) -> EventId;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Events emitted by the order aggregate on every state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    /// Order was created.
    OrderCreated(OrderCreatedData),

    /// Order payment was confirmed.
    OrderPaid(OrderPaidData),

    /// Order was handed to shipping.
    OrderShipped(OrderShippedData),

    /// Order was cancelled.
    OrderCancelled(OrderCancelledData),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderCreated(_) => "OrderCreated",
            OrderEvent::OrderPaid(_) => "OrderPaid",
            OrderEvent::OrderShipped(_) => "OrderShipped",
            OrderEvent::OrderCancelled(_) => "OrderCancelled",
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            OrderEvent::OrderCreated(data) => data.event_id,
            OrderEvent::OrderPaid(data) => data.event_id,
            OrderEvent::OrderShipped(data) => data.event_id,
            OrderEvent::OrderCancelled(data) => data.event_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderCreated(data) => data.occurred_at,
            OrderEvent::OrderPaid(data) => data.occurred_at,
            OrderEvent::OrderShipped(data) => data.occurred_at,
            OrderEvent::OrderCancelled(data) => data.occurred_at,
        }
    }
}

impl OrderEvent {
    /// Returns the ID of the order this event belongs to.
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderEvent::OrderCreated(data) => data.order_id,
            OrderEvent::OrderPaid(data) => data.order_id,
            OrderEvent::OrderShipped(data) => data.order_id,
            OrderEvent::OrderCancelled(data) => data.order_id,
        }
    }
}

/// Data for OrderCreated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedData {
    /// Unique ID of this event occurrence.
    pub event_id: EventId,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// The order that was created.
    pub order_id: OrderId,

    /// The customer who placed the order.
    pub customer_id: CustomerId,

    /// Order total at creation time.
    pub total_amount: Money,

    /// Number of line items.
    pub item_count: usize,
}

/// Data for OrderPaid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPaidData {
    /// Unique ID of this event occurrence.
    pub event_id: EventId,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// The order that was paid.
    pub order_id: OrderId,

    /// The customer who placed the order.
    pub customer_id: CustomerId,

    /// Order total charged.
    pub total_amount: Money,

    /// When payment was confirmed.
    pub paid_at: DateTime<Utc>,
}

/// Data for OrderShipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderShippedData {
    /// Unique ID of this event occurrence.
    pub event_id: EventId,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// The order that was shipped.
    pub order_id: OrderId,

    /// The customer who placed the order.
    pub customer_id: CustomerId,

    /// When the order was handed to shipping.
    pub shipped_at: DateTime<Utc>,
}

/// Data for OrderCancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCancelledData {
    /// Unique ID of this event occurrence.
    pub event_id: EventId,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// The order that was cancelled.
    pub order_id: OrderId,

    /// The customer who placed the order.
    pub customer_id: CustomerId,

    /// Reason for cancellation.
    pub reason: String,
}

// Convenience constructors for events
impl OrderEvent {
    /// Creates an OrderCreated event.
    pub fn order_created(
        order_id: OrderId,
        customer_id: CustomerId,
        total_amount: Money,
        item_count: usize,
    ) -> Self {
        OrderEvent::OrderCreated(OrderCreatedData {
            event_id: EventId::new(),
            occurred_at: Utc::now(),
            order_id,
            customer_id,
            total_amount,
            item_count,
        })
    }

    /// Creates an OrderPaid event.
    pub fn order_paid(
        order_id: OrderId,
        customer_id: CustomerId,
        total_amount: Money,
        paid_at: DateTime<Utc>,
    ) -> Self {
        OrderEvent::OrderPaid(OrderPaidData {
            event_id: EventId::new(),
            occurred_at: Utc::now(),
            order_id,
            customer_id,
            total_amount,
            paid_at,
        })
    }

    /// Creates an OrderShipped event.
    pub fn order_shipped(
        order_id: OrderId,
        customer_id: CustomerId,
        shipped_at: DateTime<Utc>,
    ) -> Self {
        OrderEvent::OrderShipped(OrderShippedData {
            event_id: EventId::new(),
            occurred_at: Utc::now(),
            order_id,
            customer_id,
            shipped_at,
        })
    }

    /// Creates an OrderCancelled event.
    pub fn order_cancelled(
        order_id: OrderId,
        customer_id: CustomerId,
        reason: impl Into<String>,
    ) -> Self {
        OrderEvent::OrderCancelled(OrderCancelledData {
            event_id: EventId::new(),
            occurred_at: Utc::now(),
            order_id,
            customer_id,
            reason: reason.into(),
        })
    }
}
