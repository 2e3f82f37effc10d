//! Integration tests for the order lifecycle engine.
//!
//! Exercises the aggregate's observable properties end to end:
//! creation, payment idempotency, shipping, cancellation rules, and
//! event emission.

use domain::{
    Address, CustomerId, DomainEvent, Money, Order, OrderError, OrderEvent, OrderItem, OrderStatus,
};
use rust_decimal_macros::dec;

fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, "USD").unwrap()
}

fn us_address() -> Address {
    Address::new("742 Evergreen Terrace", "Springfield", "IL", "62704", "US").unwrap()
}

mod creation {
    use super::*;

    #[test]
    fn valid_order_starts_created_with_summed_total() {
        let items = vec![
            OrderItem::new("SKU-001", "Widget", usd(dec!(10.00)), 2).unwrap(),
            OrderItem::new("SKU-002", "Gadget", usd(dec!(7.50)), 4).unwrap(),
        ];
        let mut order =
            Order::create(CustomerId::new("C1").unwrap(), items, us_address()).unwrap();

        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(order.total().unwrap(), usd(dec!(50.00)));

        let events = order.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "OrderCreated");
    }

    #[test]
    fn empty_item_list_fails_before_identity_assignment() {
        let result = Order::create(CustomerId::new("C1").unwrap(), vec![], us_address());
        assert!(matches!(result, Err(OrderError::NoItems)));
    }

    #[test]
    fn items_are_read_only_after_creation() {
        let items = vec![OrderItem::new("SKU-001", "Widget", usd(dec!(10)), 1).unwrap()];
        let order = Order::create(CustomerId::new("C1").unwrap(), items, us_address()).unwrap();

        let view: &[OrderItem] = order.items();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].quantity(), 1);
    }
}

mod payment {
    use super::*;

    #[test]
    fn pay_twice_yields_identical_paid_at() {
        let items = vec![OrderItem::new("SKU-001", "Widget", usd(dec!(10)), 1).unwrap()];
        let mut order =
            Order::create(CustomerId::new("C1").unwrap(), items, us_address()).unwrap();

        order.pay().unwrap();
        let first = order.paid_at();

        order.pay().unwrap();
        assert_eq!(order.paid_at(), first);
    }
}

mod shipping {
    use super::*;

    #[test]
    fn ship_from_paid_sets_shipped_at_then_second_ship_fails() {
        let items = vec![OrderItem::new("SKU-001", "Widget", usd(dec!(10)), 1).unwrap()];
        let mut order =
            Order::create(CustomerId::new("C1").unwrap(), items, us_address()).unwrap();

        order.pay().unwrap();
        order.ship().unwrap();
        assert_eq!(order.status(), OrderStatus::Shipped);
        assert!(order.shipped_at().is_some());

        assert!(matches!(
            order.ship(),
            Err(OrderError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn ship_unpaid_always_fails() {
        let items = vec![OrderItem::new("SKU-XL", "Expensive Thing", usd(dec!(999.99)), 9).unwrap()];
        let mut order =
            Order::create(CustomerId::new("C2").unwrap(), items, us_address()).unwrap();

        assert!(matches!(
            order.ship(),
            Err(OrderError::InvalidTransition {
                status: OrderStatus::Created,
                ..
            })
        ));
    }
}

mod cancellation {
    use super::*;

    #[test]
    fn cancel_from_created_and_paid_succeeds() {
        let items = vec![OrderItem::new("SKU-001", "Widget", usd(dec!(10)), 1).unwrap()];

        let mut created =
            Order::create(CustomerId::new("C1").unwrap(), items.clone(), us_address()).unwrap();
        created.cancel("no longer needed").unwrap();
        assert_eq!(created.status(), OrderStatus::Cancelled);

        let mut paid = Order::create(CustomerId::new("C1").unwrap(), items, us_address()).unwrap();
        paid.pay().unwrap();
        paid.cancel("refund requested").unwrap();
        assert_eq!(paid.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn cancel_shipped_always_fails() {
        let items = vec![OrderItem::new("SKU-001", "Widget", usd(dec!(10)), 1).unwrap()];
        let mut order =
            Order::create(CustomerId::new("C1").unwrap(), items, us_address()).unwrap();

        order.pay().unwrap();
        order.ship().unwrap();
        assert!(matches!(
            order.cancel("too late"),
            Err(OrderError::InvalidTransition {
                status: OrderStatus::Shipped,
                ..
            })
        ));
    }
}

/// The concrete walkthrough: one item at 10.00 USD x 2 for customer C1.
#[test]
fn full_lifecycle_scenario() {
    let items = vec![OrderItem::new("SKU-001", "Widget", usd(dec!(10.00)), 2).unwrap()];
    let mut order = Order::create(CustomerId::new("C1").unwrap(), items, us_address()).unwrap();

    assert_eq!(order.total().unwrap(), usd(dec!(20.00)));
    assert_eq!(order.status(), OrderStatus::Created);
    order.take_events();

    // Pay: one paid event carrying the total.
    order.pay().unwrap();
    assert_eq!(order.status(), OrderStatus::Paid);
    let events = order.take_events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        OrderEvent::OrderPaid(data) => assert_eq!(data.total_amount, usd(dec!(20.00))),
        other => panic!("Expected OrderPaid, got {}", other.event_type()),
    }

    // Pay again: still Paid, no new event.
    order.pay().unwrap();
    assert_eq!(order.status(), OrderStatus::Paid);
    assert!(order.take_events().is_empty());

    // Ship.
    order.ship().unwrap();
    assert_eq!(order.status(), OrderStatus::Shipped);

    // Cancel after shipping fails, mentioning "shipped".
    let err = order.cancel("return instead").unwrap_err();
    assert!(err.to_string().to_lowercase().contains("shipped"));
}

#[test]
fn money_rounding_and_line_total_properties() {
    assert_eq!(Money::new(dec!(10.005), "USD").unwrap().amount(), dec!(10.01));

    let item = OrderItem::new("SKU-001", "Widget", usd(dec!(12.50)), 3).unwrap();
    assert_eq!(item.line_total(), usd(dec!(37.50)));

    let result = usd(dec!(5)).add(&Money::new(dec!(3), "EUR").unwrap());
    assert!(result.is_err());
}
