//! Order service: the orchestrator-facing contract of the core.

use common::OrderId;
use domain::{Address, CustomerId, DomainEvent, Order, OrderItem, OrderStatus};
use order_store::{OrderRecord, OrderRepository, RetryPolicy, SaveOptions, Version, with_retry};

use crate::error::OrchestratorError;
use crate::sink::EventSink;

/// Coordinates the read-mutate-write cycle for order lifecycle
/// operations.
///
/// Every mutation follows the same sequence: load the order, call the
/// aggregate mutator, persist the new state with a version check, then
/// drain the recorded events and publish them. Persistence calls are
/// wrapped in retry-with-backoff for transient failures only; a
/// version conflict surfaces to the caller, who must re-read and
/// retry the whole cycle.
///
/// Idempotent no-ops (paying a paid order, cancelling a cancelled
/// order) record no event and skip both the save and the publish.
pub struct OrderService<R, S> {
    repository: R,
    sink: S,
    retry: RetryPolicy,
}

impl<R, S> OrderService<R, S>
where
    R: OrderRepository,
    S: EventSink,
{
    /// Creates a service with the default retry policy.
    pub fn new(repository: R, sink: S) -> Self {
        Self::with_retry_policy(repository, sink, RetryPolicy::default())
    }

    /// Creates a service with an explicit retry policy.
    pub fn with_retry_policy(repository: R, sink: S, retry: RetryPolicy) -> Self {
        Self {
            repository,
            sink,
            retry,
        }
    }

    /// Creates a new order and publishes its creation event.
    #[tracing::instrument(skip(self, items, shipping_address))]
    pub async fn create_order(
        &self,
        customer_id: &str,
        items: Vec<OrderItem>,
        shipping_address: Address,
    ) -> Result<Order, OrchestratorError> {
        let customer_id = CustomerId::new(customer_id)?;
        let mut order = Order::create(customer_id, items, shipping_address)?;

        self.persist_then_publish(&mut order, SaveOptions::expect_new())
            .await?;
        metrics::counter!("orders_created_total").increment(1);

        tracing::info!(order_id = %order.id(), "order created");
        Ok(order)
    }

    /// Marks an order as paid. Safe to call repeatedly: duplicate
    /// payment requests are absorbed without a new event or write.
    #[tracing::instrument(skip(self))]
    pub async fn pay_order(&self, order_id: OrderId) -> Result<Order, OrchestratorError> {
        let record = self.load(order_id).await?;
        let mut order = record.order;
        order.pay()?;

        if order.has_pending_events() {
            self.persist_then_publish(&mut order, SaveOptions::expect_version(record.version))
                .await?;
            metrics::counter!("orders_paid_total").increment(1);
            tracing::info!(order_id = %order.id(), "order paid");
        }
        Ok(order)
    }

    /// Ships a paid order.
    #[tracing::instrument(skip(self))]
    pub async fn ship_order(&self, order_id: OrderId) -> Result<Order, OrchestratorError> {
        let record = self.load(order_id).await?;
        let mut order = record.order;
        order.ship()?;

        self.persist_then_publish(&mut order, SaveOptions::expect_version(record.version))
            .await?;
        metrics::counter!("orders_shipped_total").increment(1);

        tracing::info!(order_id = %order.id(), "order shipped");
        Ok(order)
    }

    /// Cancels an order. Cancelling an already-cancelled order is a
    /// no-op.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        order_id: OrderId,
        reason: &str,
    ) -> Result<Order, OrchestratorError> {
        let record = self.load(order_id).await?;
        let mut order = record.order;
        order.cancel(reason)?;

        if order.has_pending_events() {
            self.persist_then_publish(&mut order, SaveOptions::expect_version(record.version))
                .await?;
            metrics::counter!("orders_cancelled_total").increment(1);
            tracing::info!(order_id = %order.id(), reason, "order cancelled");
        }
        Ok(order)
    }

    /// Retrieves an order by ID.
    pub async fn order(&self, order_id: OrderId) -> Result<Order, OrchestratorError> {
        self.load(order_id).await.map(|record| record.order)
    }

    /// Retrieves all orders placed by a customer.
    pub async fn orders_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<Order>, OrchestratorError> {
        let customer_id = CustomerId::new(customer_id)?;
        let repository = &self.repository;
        let customer_ref = &customer_id;
        let records = with_retry(&self.retry, move || {
            repository.find_by_customer(customer_ref)
        })
        .await?;
        Ok(records.into_iter().map(|record| record.order).collect())
    }

    /// Retrieves all orders in the given status.
    pub async fn orders_with_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<Order>, OrchestratorError> {
        let repository = &self.repository;
        let records = with_retry(&self.retry, move || repository.find_by_status(status)).await?;
        Ok(records.into_iter().map(|record| record.order).collect())
    }

    /// Retrieves all orders.
    pub async fn orders(&self) -> Result<Vec<Order>, OrchestratorError> {
        let repository = &self.repository;
        let records = with_retry(&self.retry, move || repository.find_all()).await?;
        Ok(records.into_iter().map(|record| record.order).collect())
    }

    async fn load(&self, order_id: OrderId) -> Result<OrderRecord, OrchestratorError> {
        let repository = &self.repository;
        with_retry(&self.retry, move || repository.find_by_id(order_id))
            .await?
            .ok_or(OrchestratorError::OrderNotFound { order_id })
    }

    /// Persists the order, then drains and publishes its events.
    ///
    /// The publish step runs strictly after the save succeeds: a
    /// persistence failure prevents any publish attempt, and a publish
    /// failure never unwinds the committed state. Consumers observe
    /// state before its event and must handle events idempotently.
    async fn persist_then_publish(
        &self,
        order: &mut Order,
        options: SaveOptions,
    ) -> Result<Version, OrchestratorError> {
        let version = {
            let repository = &self.repository;
            let order_ref: &Order = order;
            with_retry(&self.retry, move || repository.save(order_ref, options)).await?
        };

        for event in order.take_events() {
            match self.sink.publish(&event).await {
                Ok(()) => {
                    metrics::counter!("order_events_published_total").increment(1);
                }
                Err(error) => {
                    metrics::counter!("order_event_publish_failures_total").increment(1);
                    tracing::error!(
                        order_id = %order.id(),
                        event_type = event.event_type(),
                        error = %error,
                        "event publication failed after committed state change"
                    );
                }
            }
        }

        Ok(version)
    }
}
