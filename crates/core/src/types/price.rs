//! Type-safe price representation using decimal arithmetic.
//!
//! StyleHub prices carry two amounts: the list price (`mrp`) and the actual
//! selling price (`cost`). The API serializes both as plain JSON numbers, so
//! the serde representation here uses decimal-as-float.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price as listed by a seller.
///
/// `cost` is what the customer pays; `mrp` is the list price shown
/// struck-through when the product is discounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Price {
    /// List price (maximum retail price).
    #[serde(with = "rust_decimal::serde::float")]
    pub mrp: Decimal,
    /// Selling price.
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(mrp: Decimal, cost: Decimal) -> Self {
        Self { mrp, cost }
    }

    /// Whether the selling price is below the list price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.cost < self.mrp
    }

    /// Discount as a percentage of the list price, rounded to whole percent.
    ///
    /// Returns zero when the list price is zero or not above the cost.
    #[must_use]
    pub fn discount_percent(&self) -> Decimal {
        if self.mrp.is_zero() || !self.is_discounted() {
            return Decimal::ZERO;
        }
        ((self.mrp - self.cost) / self.mrp * Decimal::ONE_HUNDRED).round()
    }

    /// Total selling price for `quantity` units.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Decimal {
        self.cost * Decimal::from(quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_discount_percent() {
        let price = Price::new(dec("2000"), dec("1500"));
        assert_eq!(price.discount_percent(), dec("25"));
    }

    #[test]
    fn test_discount_percent_zero_mrp() {
        let price = Price::new(Decimal::ZERO, dec("100"));
        assert_eq!(price.discount_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_not_discounted() {
        let price = Price::new(dec("100"), dec("100"));
        assert!(!price.is_discounted());
        assert_eq!(price.discount_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_line_total() {
        let price = Price::new(dec("2000"), dec("1499.50"));
        assert_eq!(price.line_total(3), dec("4498.50"));
    }

    #[test]
    fn test_serde_numbers() {
        let price = Price::new(dec("1999"), dec("1499"));
        let json = serde_json::to_value(&price).unwrap();
        assert_eq!(json["mrp"], serde_json::json!(1999.0));
        assert_eq!(json["cost"], serde_json::json!(1499.0));

        let parsed: Price = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, price);
    }
}
