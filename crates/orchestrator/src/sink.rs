//! Event sink port and in-memory implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use domain::OrderEvent;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur when publishing an event.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink is unavailable.
    #[error("Event sink unavailable: {0}")]
    Unavailable(String),
}

/// Delivers emitted domain events to downstream consumers.
///
/// Events are opaque immutable records to the sink; consumers must
/// handle them idempotently, since the state change is durable before
/// its event is observed.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publishes a single event.
    async fn publish(&self, event: &OrderEvent) -> Result<(), SinkError>;
}

/// In-memory event sink for tests.
///
/// Records every published event in order and supports failure
/// injection.
#[derive(Clone, Default)]
pub struct InMemoryEventSink {
    events: Arc<RwLock<Vec<OrderEvent>>>,
    fail: Arc<AtomicBool>,
}

impl InMemoryEventSink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the sink to fail every publish call.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Returns a copy of all published events, in publication order.
    pub async fn published(&self) -> Vec<OrderEvent> {
        self.events.read().await.clone()
    }

    /// Returns the number of published events.
    pub async fn published_count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Clears all recorded events.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl EventSink for InMemoryEventSink {
    async fn publish(&self, event: &OrderEvent) -> Result<(), SinkError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SinkError::Unavailable("injected failure".to_string()));
        }
        self.events.write().await.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::OrderId;
    use domain::{CustomerId, DomainEvent, Money};
    use rust_decimal_macros::dec;

    fn sample_event() -> OrderEvent {
        OrderEvent::order_created(
            OrderId::new(),
            CustomerId::new("C1").unwrap(),
            Money::new(dec!(10), "USD").unwrap(),
            1,
        )
    }

    #[tokio::test]
    async fn publish_records_events_in_order() {
        let sink = InMemoryEventSink::new();
        let first = sample_event();
        let second = sample_event();

        sink.publish(&first).await.unwrap();
        sink.publish(&second).await.unwrap();

        let published = sink.published().await;
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].event_id(), first.event_id());
        assert_eq!(published[1].event_id(), second.event_id());
    }

    #[tokio::test]
    async fn fail_injection() {
        let sink = InMemoryEventSink::new();
        sink.set_fail(true);

        let result = sink.publish(&sample_event()).await;
        assert!(matches!(result, Err(SinkError::Unavailable(_))));
        assert_eq!(sink.published_count().await, 0);

        sink.set_fail(false);
        sink.publish(&sample_event()).await.unwrap();
        assert_eq!(sink.published_count().await, 1);
    }
}
