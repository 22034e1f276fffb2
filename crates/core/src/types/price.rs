//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A product price in the shop's single currency.
///
/// Stored as a [`Decimal`] to avoid float rounding, but carried over JSON as
/// a plain number so clients can send `100` or `149.5`.
///
/// ```
/// use rust_decimal::Decimal;
/// use showcase_core::Price;
///
/// let price = Price::new(Decimal::new(14950, 2)).unwrap();
/// assert_eq!(serde_json::to_string(&price).unwrap(), "149.5");
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a validated price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount.normalize()))
    }

    /// Re-check an amount that arrived through deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn validate(self) -> Result<Self, PriceError> {
        Self::new(self.0)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_json_round_trips() {
        let price: Price = serde_json::from_str("100").unwrap();
        assert_eq!(price.amount(), Decimal::new(100, 0));
        assert_eq!(serde_json::to_string(&price).unwrap(), "100.0");
    }

    #[test]
    fn test_zero_is_allowed() {
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_negative_rejected_after_deserialize() {
        let price: Price = serde_json::from_str("-5").unwrap();
        assert_eq!(price.validate(), Err(PriceError::Negative));
    }

    #[test]
    fn test_display_two_places() {
        let price = Price::new(Decimal::new(899, 0)).unwrap();
        assert_eq!(price.to_string(), "899.00");
    }
}
