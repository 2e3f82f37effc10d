//! Order aggregate and related types.

mod aggregate;
mod events;
mod money;
mod status;
mod value_objects;

pub use aggregate::Order;
pub use events::{
    DomainEvent, OrderCancelledData, OrderCreatedData, OrderEvent, OrderPaidData, OrderShippedData,
};
pub use money::{Currency, Money, MoneyError};
pub use status::OrderStatus;
pub use value_objects::{Address, AddressError, CustomerId, ItemError, OrderItem, ProductId};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Customer ID is required.
    #[error("Customer ID must not be blank")]
    CustomerIdRequired,

    /// Order has no items.
    #[error("Order must contain at least one item")]
    NoItems,

    /// Order total is zero.
    #[error("Order total must be greater than zero")]
    EmptyOrderTotal,

    /// A mutator was called from a status that does not legally reach
    /// the target.
    #[error("Invalid transition: cannot {action} an order in {status} status: {detail}")]
    InvalidTransition {
        status: OrderStatus,
        action: &'static str,
        detail: &'static str,
    },

    /// A monetary value was invalid or mixed currencies.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The shipping address was invalid.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// An order item was invalid.
    #[error(transparent)]
    Item(#[from] ItemError),
}
