//! Domain layer for the order lifecycle engine.
//!
//! This crate provides the core of the system:
//! - Value objects: `Money`, `Address`, `OrderItem` and typed identifiers
//! - The `OrderStatus` state machine governing legal transitions
//! - The `Order` aggregate owning state and recording domain events
//! - The `OrderEvent` fact records emitted on every state change
//!
//! The aggregate never talks to persistence or an event sink; it only
//! records events into an internal buffer that an orchestrator drains
//! with [`Order::take_events`] after the state has been made durable.

pub mod order;

pub use order::{
    Address, AddressError, Currency, CustomerId, DomainEvent, ItemError, Money, MoneyError, Order,
    OrderCancelledData, OrderCreatedData, OrderError, OrderEvent, OrderItem, OrderPaidData,
    OrderShippedData, OrderStatus, ProductId,
};
