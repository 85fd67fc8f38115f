//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a cart in floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every line price has two fractional digits, so                      │
//! │    Σ(price × qty) in cents is exact. Rounding to 2 decimals only       │
//! │    happens when a value is shown or printed.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where Floats Still Arrive
//! The backend and the pricing hand-off speak JSON numbers (`100.5`), and the
//! cashier types cash as text. Those are converted exactly once, at the
//! boundary, with [`Money::from_decimal`] / [`Money::parse_decimal`].
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let line = price * 3u32;             // 32.97
//! assert_eq!(line.to_string(), "32.97");
//! assert_eq!(line.format_with("₱"), "₱32.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos / cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: receipt change may be negative when cash checks are off
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Saturating arithmetic**: line totals and sums pin at the i64 bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Largest unit price accepted off the wire: 999,999,999.99.
    pub const MAX_PRICE: Money = Money(99_999_999_999);

    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a decimal amount in major units to Money.
    ///
    /// Rounds half away from zero to the nearest cent. Returns `None` for
    /// NaN, infinities, and values outside the representable range.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(100.5), Some(Money::from_cents(10050)));
    /// assert_eq!(Money::from_decimal(33.335), Some(Money::from_cents(3334)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        // 33.335 * 100.0 = 3333.4999999999995, so round on a value nudged by
        // the representation error before the half-away-from-zero step.
        let scaled = amount * 100.0;
        let nudged = scaled + scaled.signum() * scaled.abs() * f64::EPSILON * 4.0;
        let cents = nudged.round();

        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Parses typed input such as `"300"`, `"299.5"` or `" 12.25 "`.
    ///
    /// Returns `None` when the text is not a finite number. Blank input is
    /// also `None`; callers that treat blank as zero do so explicitly.
    pub fn parse_decimal(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        trimmed.parse::<f64>().ok().and_then(Money::from_decimal)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value in major units as a float, for JSON payloads only.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Wooden Coaster ₱100.00
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: ₱200.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats the amount with a currency symbol in front.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(25000).format_with("₱"), "₱250.00");
    /// assert_eq!(Money::from_cents(-550).format_with("$"), "-$5.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.major().abs(),
            self.minor_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering, e.g. `250.00` or `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(""))
    }
}

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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// JSON Number Encoding
// =============================================================================

/// Serde adapter that writes Money as a JSON number in major units.
///
/// The backend stores prices as floats (`"price": 100.5`), so wire types
/// use `#[serde(with = "crate::money::as_decimal")]` while everything
/// in memory stays in cents.
pub mod as_decimal {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount)
            .filter(|money| money.abs() <= Money::MAX_PRICE)
            .ok_or_else(|| D::Error::custom(format!("amount {} is out of range", amount)))
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(25000).format_with("₱"), "₱250.00");
        assert_eq!(Money::from_cents(-100).format_with("₱"), "-₱1.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3u32).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_from_decimal_rounding() {
        assert_eq!(Money::from_decimal(100.0), Some(Money::from_cents(10000)));
        assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_decimal(2.675), Some(Money::from_cents(268)));
        assert_eq!(Money::from_decimal(-1.005), Some(Money::from_cents(-101)));
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
        assert_eq!(Money::from_decimal(f64::NAN), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("300"), Some(Money::from_cents(30000)));
        assert_eq!(Money::parse_decimal(" 249.99 "), Some(Money::from_cents(24999)));
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("abc"), None);
        assert_eq!(Money::parse_decimal("inf"), None);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::from_cents(-550).abs().cents(), 550);
    }

    #[test]
    fn test_as_decimal_serde() {
        #[derive(Serialize, Deserialize)]
        struct Wire {
            #[serde(with = "as_decimal")]
            price: Money,
        }

        let json = serde_json::to_string(&Wire {
            price: Money::from_cents(10050),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":100.5}"#);

        let back: Wire = serde_json::from_str(r#"{"price": 12}"#).unwrap();
        assert_eq!(back.price, Money::from_cents(1200));

        assert!(serde_json::from_str::<Wire>(r#"{"price": 999999999.99}"#).is_ok());
        assert!(serde_json::from_str::<Wire>(r#"{"price": 9.0e16}"#).is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(9_000_000_000_000_000_000);

        assert_eq!(huge * 2u32, Money::from_cents(i64::MAX));
        assert_eq!(huge + huge, Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MIN) - huge, Money::from_cents(i64::MIN));

        let total: Money = [huge, huge, Money::from_cents(1)].into_iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
    }
}
