//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};

use super::{Address, CustomerId, Money, OrderError, OrderEvent, OrderItem, OrderStatus};

/// Order aggregate root.
///
/// Owns the order's identity, items, shipping address, status, and
/// lifecycle timestamps. All mutations go through [`Order::pay`],
/// [`Order::ship`], and [`Order::cancel`]; items and address are fixed
/// at creation. Every state change records a domain event into an
/// internal buffer which the orchestrator drains with
/// [`Order::take_events`] after persisting the new state.
///
/// The aggregate is a plain synchronous object and assumes
/// single-writer access to one instance; concurrency control for
/// shared order state belongs to the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    created_at: DateTime<Utc>,
    items: Vec<OrderItem>,
    shipping_address: Address,
    status: OrderStatus,
    paid_at: Option<DateTime<Utc>>,
    shipped_at: Option<DateTime<Utc>>,

    // Pending events are a transient buffer, never part of persisted state.
    #[serde(skip)]
    pending_events: Vec<OrderEvent>,
}

impl Order {
    /// Creates a new order in Created status and records an
    /// OrderCreated event.
    ///
    /// Fails with [`OrderError::NoItems`] for an empty item list, with
    /// a currency mismatch if items carry differing currencies, and
    /// with [`OrderError::EmptyOrderTotal`] if the total is zero. No
    /// identity is assigned unless validation passes.
    pub fn create(
        customer_id: CustomerId,
        items: Vec<OrderItem>,
        shipping_address: Address,
    ) -> Result<Self, OrderError> {
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }

        let total = total_of(&items)?;
        if total.is_zero() {
            return Err(OrderError::EmptyOrderTotal);
        }

        let id = OrderId::new();
        let item_count = items.len();
        let mut order = Self {
            id,
            customer_id: customer_id.clone(),
            created_at: Utc::now(),
            items,
            shipping_address,
            status: OrderStatus::Created,
            paid_at: None,
            shipped_at: None,
            pending_events: Vec::new(),
        };

        order.pending_events.push(OrderEvent::order_created(
            id,
            customer_id,
            total,
            item_count,
        ));

        Ok(order)
    }

    /// Marks the order as paid and records an OrderPaid event.
    ///
    /// Calling this on an already Paid or Shipped order is an
    /// idempotent no-op: repeated payment requests (network retries,
    /// duplicate webhook delivery) must not error or double-count.
    /// Fails with [`OrderError::InvalidTransition`] on a cancelled
    /// order.
    pub fn pay(&mut self) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Paid | OrderStatus::Shipped => Ok(()),
            OrderStatus::Cancelled => Err(OrderError::InvalidTransition {
                status: self.status,
                action: "pay",
                detail: "cancelled orders cannot be paid",
            }),
            OrderStatus::Created => {
                let total = self.total()?;
                let now = Utc::now();
                self.status = OrderStatus::Paid;
                self.paid_at = Some(now);
                self.pending_events.push(OrderEvent::order_paid(
                    self.id,
                    self.customer_id.clone(),
                    total,
                    now,
                ));
                Ok(())
            }
        }
    }

    /// Marks the order as shipped and records an OrderShipped event.
    ///
    /// Legal only from Paid; not idempotent, since Shipped is terminal.
    pub fn ship(&mut self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Paid {
            return Err(OrderError::InvalidTransition {
                status: self.status,
                action: "ship",
                detail: "order must be paid first",
            });
        }

        let now = Utc::now();
        self.status = OrderStatus::Shipped;
        self.shipped_at = Some(now);
        self.pending_events.push(OrderEvent::order_shipped(
            self.id,
            self.customer_id.clone(),
            now,
        ));
        Ok(())
    }

    /// Cancels the order and records an OrderCancelled event.
    ///
    /// Legal from Created or Paid. Calling this on an already
    /// Cancelled order is an idempotent no-op, matching the `pay`
    /// pattern. Shipped orders cannot be cancelled.
    pub fn cancel(&mut self, reason: impl Into<String>) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Cancelled => Ok(()),
            OrderStatus::Shipped => Err(OrderError::InvalidTransition {
                status: self.status,
                action: "cancel",
                detail: "shipped orders require a return process",
            }),
            OrderStatus::Created | OrderStatus::Paid => {
                self.status = OrderStatus::Cancelled;
                self.pending_events.push(OrderEvent::order_cancelled(
                    self.id,
                    self.customer_id.clone(),
                    reason,
                ));
                Ok(())
            }
        }
    }

    /// Computes the order total as the sum of all line totals.
    ///
    /// Pure and recomputed on demand, never cached. Creation
    /// guarantees a single currency across items, so after `create`
    /// this cannot fail.
    pub fn total(&self) -> Result<Money, OrderError> {
        total_of(&self.items)
    }

    /// Returns the accumulated pending events and clears the buffer.
    ///
    /// This is the only way events leave the aggregate; publication is
    /// the orchestrator's responsibility, after the state change has
    /// been made durable.
    pub fn take_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Returns true if there are recorded events not yet drained.
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the items as a read-only slice.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    pub fn shipped_at(&self) -> Option<DateTime<Utc>> {
        self.shipped_at
    }
}

fn total_of(items: &[OrderItem]) -> Result<Money, OrderError> {
    let mut iter = items.iter();
    let first = iter.next().ok_or(OrderError::NoItems)?;
    iter.try_fold(first.line_total(), |acc, item| {
        acc.add(&item.line_total()).map_err(OrderError::from)
    })
}

// Identity equality: two orders are the same iff their IDs match,
// regardless of other field values.
impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Order {}

impl std::hash::Hash for Order {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
