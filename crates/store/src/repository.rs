//! Order repository trait and versioning types.

use async_trait::async_trait;
use common::OrderId;
use domain::{CustomerId, Order, OrderStatus};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Monotonic version of a stored order, used for optimistic
/// concurrency control on save.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Version(i64);

impl Version {
    /// Creates a version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the initial version (0) for an order not yet stored.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the first version (1) assigned by the first save.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored order together with its current version.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub order: Order,
    pub version: Version,
}

/// Options controlling the concurrency check on save.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// If set, the save fails with a version conflict unless the
    /// stored version matches. `None` performs an unchecked upsert.
    pub expected_version: Option<Version>,
}

impl SaveOptions {
    /// Expects that no version of the order has been stored yet.
    pub fn expect_new() -> Self {
        Self {
            expected_version: Some(Version::initial()),
        }
    }

    /// Expects the stored version to match exactly.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }
}

/// Durable storage for orders.
///
/// The orchestrator's read-mutate-write cycle relies on the
/// version-checked save to resolve racing transitions: one of two
/// concurrent writers fails with a conflict and must re-read.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists the order, returning the newly assigned version.
    async fn save(&self, order: &Order, options: SaveOptions) -> Result<Version>;

    /// Retrieves an order by its ID.
    async fn find_by_id(&self, order_id: OrderId) -> Result<Option<OrderRecord>>;

    /// Retrieves all orders placed by a customer.
    async fn find_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<OrderRecord>>;

    /// Retrieves all orders currently in the given status.
    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<OrderRecord>>;

    /// Retrieves all orders.
    async fn find_all(&self) -> Result<Vec<OrderRecord>>;

    /// Returns true if an order with the given ID exists.
    async fn exists(&self, order_id: OrderId) -> Result<bool>;

    /// Deletes an order by ID, failing with `NotFound` if absent.
    async fn delete(&self, order_id: OrderId) -> Result<()>;
}
