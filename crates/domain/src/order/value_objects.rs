//! Value objects for the order domain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::money::Money;
use super::OrderError;

/// Identifier of the customer who placed an order.
///
/// Guaranteed non-blank; construction trims surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a customer ID, rejecting blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, OrderError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(OrderError::CustomerIdRequired);
        }
        Ok(Self(id))
    }

    /// Returns the customer ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Product identifier (SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when constructing an address.
#[derive(Debug, Error)]
pub enum AddressError {
    /// A required field is blank.
    #[error("Address field '{field}' must not be blank")]
    BlankField { field: &'static str },

    /// Country code is not a 2-letter code.
    #[error("Country must be a 2-letter code, got '{value}'")]
    InvalidCountry { value: String },
}

/// Validated, immutable postal address.
///
/// State and country are normalized to uppercase. Compared by value
/// on all fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    city: String,
    state: String,
    postal_code: String,
    country: String,
}

impl Address {
    /// Creates an address, validating every field.
    ///
    /// Each field must be non-blank after trimming; the country must be
    /// exactly 2 characters.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, AddressError> {
        let street = required(street, "street")?;
        let city = required(city, "city")?;
        let state = required(state, "state")?.to_uppercase();
        let postal_code = required(postal_code, "postal_code")?;
        let country = required(country, "country")?.to_uppercase();

        if country.chars().count() != 2 {
            return Err(AddressError::InvalidCountry { value: country });
        }

        Ok(Self {
            street,
            city,
            state,
            postal_code,
            country,
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

fn required(value: impl Into<String>, field: &'static str) -> Result<String, AddressError> {
    let value = value.into().trim().to_string();
    if value.is_empty() {
        return Err(AddressError::BlankField { field });
    }
    Ok(value)
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.postal_code, self.country
        )
    }
}

/// Errors that can occur when constructing an order item.
#[derive(Debug, Error)]
pub enum ItemError {
    /// Product ID is blank.
    #[error("Product ID must not be blank")]
    BlankProductId,

    /// Product name is blank.
    #[error("Product name must not be blank")]
    BlankProductName,

    /// Quantity must be at least 1.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },
}

/// An immutable line item: product reference, unit price, and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    product_id: ProductId,
    product_name: String,
    unit_price: Money,
    quantity: u32,
}

impl OrderItem {
    /// Creates an order item, validating product reference and quantity.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Result<Self, ItemError> {
        let product_id = product_id.into();
        let product_name = product_name.into().trim().to_string();

        if product_id.as_str().trim().is_empty() {
            return Err(ItemError::BlankProductId);
        }
        if product_name.is_empty() {
            return Err(ItemError::BlankProductName);
        }
        if quantity == 0 {
            return Err(ItemError::InvalidQuantity { quantity });
        }

        Ok(Self {
            product_id,
            product_name,
            unit_price,
            quantity,
        })
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn unit_price(&self) -> &Money {
        &self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the line total (unit price times quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    /// Returns a new item with the given quantity, re-validating.
    ///
    /// Never mutates in place.
    pub fn with_quantity(&self, quantity: u32) -> Result<Self, ItemError> {
        Self::new(
            self.product_id.clone(),
            self.product_name.clone(),
            self.unit_price,
            quantity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, "USD").unwrap()
    }

    #[test]
    fn customer_id_rejects_blank() {
        assert!(matches!(
            CustomerId::new("   "),
            Err(OrderError::CustomerIdRequired)
        ));
    }

    #[test]
    fn customer_id_trims_input() {
        let id = CustomerId::new("  C1  ").unwrap();
        assert_eq!(id.as_str(), "C1");
    }

    #[test]
    fn product_id_string_conversion() {
        let id = ProductId::new("SKU-001");
        assert_eq!(id.as_str(), "SKU-001");

        let id2: ProductId = "SKU-002".into();
        assert_eq!(id2.as_str(), "SKU-002");
    }

    #[test]
    fn address_normalizes_state_and_country() {
        let address = Address::new("1 Main St", "Springfield", "il", "62704", "us").unwrap();
        assert_eq!(address.state(), "IL");
        assert_eq!(address.country(), "US");
    }

    #[test]
    fn address_rejects_blank_fields() {
        let result = Address::new("", "Springfield", "IL", "62704", "US");
        assert!(matches!(
            result,
            Err(AddressError::BlankField { field: "street" })
        ));

        let result = Address::new("1 Main St", "Springfield", "IL", "  ", "US");
        assert!(matches!(
            result,
            Err(AddressError::BlankField { field: "postal_code" })
        ));
    }

    #[test]
    fn address_rejects_long_country_code() {
        let result = Address::new("1 Main St", "Springfield", "IL", "62704", "USA");
        assert!(matches!(result, Err(AddressError::InvalidCountry { .. })));
    }

    #[test]
    fn address_value_equality() {
        let a = Address::new("1 Main St", "Springfield", "IL", "62704", "US").unwrap();
        let b = Address::new("1 Main St", "Springfield", "il", "62704", "us").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn item_line_total() {
        let item = OrderItem::new("SKU-001", "Widget", usd(dec!(12.50)), 3).unwrap();
        assert_eq!(item.line_total(), usd(dec!(37.50)));
    }

    #[test]
    fn item_rejects_blank_product_id() {
        let result = OrderItem::new(" ", "Widget", usd(dec!(1)), 1);
        assert!(matches!(result, Err(ItemError::BlankProductId)));
    }

    #[test]
    fn item_rejects_blank_product_name() {
        let result = OrderItem::new("SKU-001", "  ", usd(dec!(1)), 1);
        assert!(matches!(result, Err(ItemError::BlankProductName)));
    }

    #[test]
    fn item_rejects_zero_quantity() {
        let result = OrderItem::new("SKU-001", "Widget", usd(dec!(1)), 0);
        assert!(matches!(
            result,
            Err(ItemError::InvalidQuantity { quantity: 0 })
        ));
    }

    #[test]
    fn with_quantity_returns_new_instance() {
        let item = OrderItem::new("SKU-001", "Widget", usd(dec!(10)), 2).unwrap();
        let updated = item.with_quantity(5).unwrap();

        assert_eq!(item.quantity(), 2);
        assert_eq!(updated.quantity(), 5);
        assert_eq!(updated.product_id(), item.product_id());
    }

    #[test]
    fn with_quantity_revalidates() {
        let item = OrderItem::new("SKU-001", "Widget", usd(dec!(10)), 2).unwrap();
        assert!(matches!(
            item.with_quantity(0),
            Err(ItemError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn item_serialization_roundtrip() {
        let item = OrderItem::new("SKU-001", "Widget", usd(dec!(9.99)), 2).unwrap();
        let json = serde_json::to_string(&item).unwrap();
        let deserialized: OrderItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }
}
