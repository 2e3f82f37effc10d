//! In-memory order repository.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use common::OrderId;
use domain::{CustomerId, Order, OrderStatus};
use tokio::sync::RwLock;

use crate::repository::{OrderRecord, OrderRepository, SaveOptions, Version};
use crate::{Result, StoreError};

/// In-memory repository implementation for tests and local runs.
///
/// Stores orders behind an async `RwLock` and simulates a durable
/// store: saved orders go through a serde round-trip, so the
/// aggregate's pending-event buffer never survives a save, exactly as
/// it would not survive a database write.
///
/// Supports failure injection for exercising retry behavior.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, (Order, Version)>>>,
    fail_remaining: Arc<AtomicU32>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` operations fail as transient
    /// `Unavailable` errors.
    pub fn fail_next_ops(&self, count: u32) {
        self.fail_remaining.store(count, Ordering::SeqCst);
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clears all stored orders.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }

    fn check_available(&self) -> Result<()> {
        let mut remaining = self.fail_remaining.load(Ordering::SeqCst);
        while remaining > 0 {
            match self.fail_remaining.compare_exchange(
                remaining,
                remaining - 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => {
                    return Err(StoreError::Unavailable(
                        "injected transient failure".to_string(),
                    ));
                }
                Err(actual) => remaining = actual,
            }
        }
        Ok(())
    }
}

/// Clones an order the way a durable store would: serialize and
/// deserialize, dropping transient state such as pending events.
fn persisted_copy(order: &Order) -> Result<Order> {
    let value = serde_json::to_value(order)?;
    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order, options: SaveOptions) -> Result<Version> {
        self.check_available()?;
        let stored = persisted_copy(order)?;

        let mut orders = self.orders.write().await;
        let current = orders
            .get(&order.id())
            .map(|(_, version)| *version)
            .unwrap_or_else(Version::initial);

        if let Some(expected) = options.expected_version
            && current != expected
        {
            return Err(StoreError::VersionConflict {
                order_id: order.id(),
                expected,
                actual: current,
            });
        }

        let next = current.next();
        orders.insert(order.id(), (stored, next));
        Ok(next)
    }

    async fn find_by_id(&self, order_id: OrderId) -> Result<Option<OrderRecord>> {
        self.check_available()?;
        let orders = self.orders.read().await;
        Ok(orders.get(&order_id).map(|(order, version)| OrderRecord {
            order: order.clone(),
            version: *version,
        }))
    }

    async fn find_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<OrderRecord>> {
        self.check_available()?;
        let orders = self.orders.read().await;
        let mut records: Vec<_> = orders
            .values()
            .filter(|(order, _)| order.customer_id() == customer_id)
            .map(|(order, version)| OrderRecord {
                order: order.clone(),
                version: *version,
            })
            .collect();
        records.sort_by_key(|record| record.order.created_at());
        Ok(records)
    }

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<OrderRecord>> {
        self.check_available()?;
        let orders = self.orders.read().await;
        let mut records: Vec<_> = orders
            .values()
            .filter(|(order, _)| order.status() == status)
            .map(|(order, version)| OrderRecord {
                order: order.clone(),
                version: *version,
            })
            .collect();
        records.sort_by_key(|record| record.order.created_at());
        Ok(records)
    }

    async fn find_all(&self) -> Result<Vec<OrderRecord>> {
        self.check_available()?;
        let orders = self.orders.read().await;
        let mut records: Vec<_> = orders
            .values()
            .map(|(order, version)| OrderRecord {
                order: order.clone(),
                version: *version,
            })
            .collect();
        records.sort_by_key(|record| record.order.created_at());
        Ok(records)
    }

    async fn exists(&self, order_id: OrderId) -> Result<bool> {
        self.check_available()?;
        Ok(self.orders.read().await.contains_key(&order_id))
    }

    async fn delete(&self, order_id: OrderId) -> Result<()> {
        self.check_available()?;
        let mut orders = self.orders.write().await;
        orders
            .remove(&order_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { order_id })
    }
}
