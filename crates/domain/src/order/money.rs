//! Monetary value object bound to an ISO-4217 currency.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing or combining monetary values.
#[derive(Debug, Error)]
pub enum MoneyError {
    /// Amount is negative.
    #[error("Invalid amount: {amount} (must not be negative)")]
    InvalidAmount { amount: Decimal },

    /// Currency code is not a recognized ISO-4217 code.
    #[error("Unknown currency code: {code}")]
    UnknownCurrency { code: String },

    /// Arithmetic across differing currencies.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },
}

/// Recognized ISO-4217 currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Chf,
    Cad,
    Aud,
    Nzd,
    Sek,
    Nok,
    Dkk,
    Pln,
    Czk,
    Brl,
    Mxn,
    Zar,
    Inr,
    Cny,
    Hkd,
    Sgd,
    Krw,
    Ngn,
    Kes,
    Bhd,
    Jod,
    Kwd,
    Omr,
    Tnd,
}

impl Currency {
    /// Parses a currency from its ISO-4217 alphabetic code.
    ///
    /// The code is trimmed and matched case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "GBP" => Some(Currency::Gbp),
            "JPY" => Some(Currency::Jpy),
            "CHF" => Some(Currency::Chf),
            "CAD" => Some(Currency::Cad),
            "AUD" => Some(Currency::Aud),
            "NZD" => Some(Currency::Nzd),
            "SEK" => Some(Currency::Sek),
            "NOK" => Some(Currency::Nok),
            "DKK" => Some(Currency::Dkk),
            "PLN" => Some(Currency::Pln),
            "CZK" => Some(Currency::Czk),
            "BRL" => Some(Currency::Brl),
            "MXN" => Some(Currency::Mxn),
            "ZAR" => Some(Currency::Zar),
            "INR" => Some(Currency::Inr),
            "CNY" => Some(Currency::Cny),
            "HKD" => Some(Currency::Hkd),
            "SGD" => Some(Currency::Sgd),
            "KRW" => Some(Currency::Krw),
            "NGN" => Some(Currency::Ngn),
            "KES" => Some(Currency::Kes),
            "BHD" => Some(Currency::Bhd),
            "JOD" => Some(Currency::Jod),
            "KWD" => Some(Currency::Kwd),
            "OMR" => Some(Currency::Omr),
            "TND" => Some(Currency::Tnd),
            _ => None,
        }
    }

    /// Returns the ISO-4217 alphabetic code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Chf => "CHF",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Nzd => "NZD",
            Currency::Sek => "SEK",
            Currency::Nok => "NOK",
            Currency::Dkk => "DKK",
            Currency::Pln => "PLN",
            Currency::Czk => "CZK",
            Currency::Brl => "BRL",
            Currency::Mxn => "MXN",
            Currency::Zar => "ZAR",
            Currency::Inr => "INR",
            Currency::Cny => "CNY",
            Currency::Hkd => "HKD",
            Currency::Sgd => "SGD",
            Currency::Krw => "KRW",
            Currency::Ngn => "NGN",
            Currency::Kes => "KES",
            Currency::Bhd => "BHD",
            Currency::Jod => "JOD",
            Currency::Kwd => "KWD",
            Currency::Omr => "OMR",
            Currency::Tnd => "TND",
        }
    }

    /// Returns the number of decimal places of the currency's minor unit.
    pub fn minor_units(&self) -> u32 {
        match self {
            Currency::Jpy | Currency::Krw => 0,
            Currency::Bhd | Currency::Jod | Currency::Kwd | Currency::Omr | Currency::Tnd => 3,
            _ => 2,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An exact-decimal amount bound to a currency.
///
/// The amount is always stored at the currency's canonical scale,
/// rounding half-up on construction and on multiplication. Equality
/// requires matching currencies and equal amounts (scale-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a monetary value from an amount and an ISO-4217 code.
    ///
    /// Fails with [`MoneyError::UnknownCurrency`] for an unrecognized
    /// code and [`MoneyError::InvalidAmount`] for a negative amount.
    /// The amount is scaled to the currency's canonical precision.
    pub fn new(amount: Decimal, code: &str) -> Result<Self, MoneyError> {
        let currency = Currency::from_code(code).ok_or_else(|| MoneyError::UnknownCurrency {
            code: code.to_string(),
        })?;
        Self::with_currency(amount, currency)
    }

    /// Creates a monetary value from an amount and an already-parsed currency.
    pub fn with_currency(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        if amount < Decimal::ZERO {
            return Err(MoneyError::InvalidAmount { amount });
        }
        Ok(Self {
            amount: canonical(amount, currency),
            currency,
        })
    }

    /// Returns zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: canonical(Decimal::ZERO, currency),
            currency,
        }
    }

    /// Returns the amount at the currency's canonical scale.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Adds another monetary value of the same currency.
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.check_currency(other)?;
        Ok(Money {
            amount: canonical(self.amount + other.amount, self.currency),
            currency: self.currency,
        })
    }

    /// Scales by an integer quantity, re-rounding to canonical precision.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            amount: canonical(self.amount * Decimal::from(quantity), self.currency),
            currency: self.currency,
        }
    }

    /// Compares amounts, failing across differing currencies.
    pub fn is_greater_than(&self, other: &Money) -> Result<bool, MoneyError> {
        self.check_currency(other)?;
        Ok(self.amount > other.amount)
    }

    fn check_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(())
    }
}

/// Rounds half-up to the currency's minor units and pads to canonical scale.
fn canonical(amount: Decimal, currency: Currency) -> Decimal {
    let scale = currency.minor_units();
    let mut rounded = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
