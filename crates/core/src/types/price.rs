//! Type-safe price representation in Chilean pesos.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A unit price in Chilean pesos (CLP).
///
/// CLP has no minor units, so prices are whole-peso non-negative integers
/// and serialize as bare JSON numbers (`4990`, not `"4990.00"`).
///
/// ## Examples
///
/// ```
/// use tienda_core::Price;
///
/// let price = Price::new(4990);
/// assert_eq!(price.amount(), 4990);
/// assert_eq!(price.line_total(3), 14_970);
/// assert_eq!(format!("{price}"), "$4990");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Create a price from a whole-peso amount.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// The whole-peso amount.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.0
    }

    /// Total for `qty` units, widened so large carts cannot overflow.
    #[must_use]
    pub const fn line_total(&self, qty: u32) -> i64 {
        self.0 as i64 * qty as i64
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(amount)
    }
}

impl From<Price> for u32 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(Price::new(1000).line_total(3), 3000);
        assert_eq!(Price::new(0).line_total(100), 0);
    }

    #[test]
    fn test_line_total_does_not_overflow_u32() {
        let total = Price::new(u32::MAX).line_total(u32::MAX);
        assert_eq!(total, i64::from(u32::MAX) * i64::from(u32::MAX));
    }

    #[test]
    fn test_serde_bare_number() {
        let price = Price::new(4990);
        assert_eq!(serde_json::to_string(&price).unwrap(), "4990");

        let parsed: Price = serde_json::from_str("4990").unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-1").is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(Price::new(1000) < Price::new(2000));
    }
}
