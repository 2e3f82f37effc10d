//! Shared identifier types used across the order lifecycle crates.

mod types;

pub use types::{EventId, OrderId};
