//! Persistence port for the order lifecycle engine.
//!
//! The core never talks to storage directly; it goes through the
//! [`OrderRepository`] trait. This crate provides the trait, an
//! optimistic-concurrency [`Version`], an in-memory implementation
//! for tests and local runs, and an explicit retry-with-backoff
//! helper for transient store failures.

mod error;
mod memory;
mod repository;
mod retry;

pub use error::StoreError;
pub use memory::InMemoryOrderRepository;
pub use repository::{OrderRecord, OrderRepository, SaveOptions, Version};
pub use retry::{RetryPolicy, with_retry};

/// Convenience result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
