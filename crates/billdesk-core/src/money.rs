//! # Money Module
//!
//! Provides the `Money` type for tier unit amounts and price previews.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A graduated price of 1000 units at $0.10:                              │
//! │    floats can land on $99.99999999  → rounding disputes on invoices     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    1000 × 10 cents = 10000 cents, exactly                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The billing API takes `unit_amount` in the currency's minor unit, so this
//! type serializes as a bare integer.
//!
//! ## Usage
//! ```rust
//! use billdesk_core::money::Money;
//!
//! let unit = Money::from_cents(25); // $0.25 per unit
//! let line = unit.multiply_quantity(40);
//! assert_eq!(line.cents(), 1000);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: credit notes carry negative amounts
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Newtype serde**: `{"unit_amount": 250}` on the wire
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use billdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit amount by a quantity of units.
    ///
    /// Saturates at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use billdesk_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Renders the amount with a currency symbol and `decimals` minor-unit
    /// digits.
    ///
    /// ## Example
    /// ```rust
    /// use billdesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).format("$", 2), "$10.99");
    /// assert_eq!(Money::from_cents(-5).format("€", 2), "-€0.05");
    /// assert_eq!(Money::from_cents(500).format("¥", 0), "¥500");
    /// ```
    pub fn format(&self, symbol: &str, decimals: u8) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let minor = self.0.unsigned_abs();

        if decimals == 0 {
            return format!("{sign}{symbol}{minor}");
        }

        let divisor = 10_u64.saturating_pow(u32::from(decimals));
        format!(
            "{sign}{symbol}{}.{:0width$}",
            minor / divisor,
            minor % divisor,
            width = usize::from(decimals)
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert!(!money.is_negative());
    }

    #[test]
    fn test_format() {
        assert_eq!(Money::from_cents(1099).format("$", 2), "$10.99");
        assert_eq!(Money::from_cents(500).format("$", 2), "$5.00");
        assert_eq!(Money::from_cents(-550).format("$", 2), "-$5.50");
        assert_eq!(Money::from_cents(0).format("£", 2), "£0.00");
        assert_eq!(Money::from_cents(1234).format("¥", 0), "¥1234");
        assert_eq!(Money::from_cents(12345).format("KD ", 3), "KD 12.345");
        assert_eq!(Money::from_cents(i64::MIN).format("$", 2), "-$92233720368547758.08");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let unit = Money::from_cents(i64::MAX / 2);
        assert_eq!(unit.multiply_quantity(3).cents(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Money::from_cents(250)).unwrap();
        assert_eq!(json, "250");

        let back: Money = serde_json::from_str("250").unwrap();
        assert_eq!(back, Money::from_cents(250));
    }
}
