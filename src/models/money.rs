//! Money type for representing currency amounts
//!
//! Wraps a `rust_decimal::Decimal` so repeated arithmetic on server figures
//! never drifts the way binary floats do. On the wire amounts are plain JSON
//! numbers; for display they are always rendered with two decimals.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from a decimal
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money amount from whole currency units
    pub fn from_major(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a Money amount from minor units (hundredths)
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, 2))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiply by a decimal factor (e.g. 0.5 for a 50% share)
    pub fn scale(&self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }

    /// This amount as a percentage of `whole`, or `None` when `whole` is zero
    pub fn percent_of(&self, whole: Money) -> Option<Decimal> {
        if whole.is_zero() {
            return None;
        }
        self.0
            .checked_div(whole.0)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "₹1,200", "10".
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let cleaned: String = rest
            .trim_start_matches(['$', '₹', '€', '£'])
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();

        let value = Decimal::from_str(&cleaned)
            .map_err(|_| MoneyParseError::InvalidFormat(s.trim().to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, always two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let cents = self.to_cents();
        if cents.is_sign_negative() && !cents.is_zero() {
            format!("-{}{:.2}", symbol, cents.abs())
        } else {
            format!("{}{:.2}", symbol, cents.abs())
        }
    }

    /// Rounded half away from zero to two places; `{:.2}` alone truncates
    fn to_cents(self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.to_cents();
        if cents.is_zero() {
            write!(f, "0.00")
        } else {
            write!(f, "{:.2}", cents)
        }
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is required"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Money::new(dec!(10.5)).to_string(), "10.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_minor(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(Money::new(dec!(0.999)).to_string(), "1.00");
        assert_eq!(Money::new(dec!(1.005)).to_string(), "1.01");
        assert_eq!(Money::new(dec!(617.285)).to_string(), "617.29");
        assert_eq!(Money::new(dec!(-1.005)).to_string(), "-1.01");
        assert_eq!(Money::new(dec!(-0.001)).to_string(), "0.00");
        assert_eq!(Money::new(dec!(617.285)).format_with_symbol("₹"), "₹617.29");
        assert_eq!(Money::new(dec!(-0.004)).format_with_symbol("₹"), "₹0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_major(38000).format_with_symbol("₹"), "₹38000.00");
        assert_eq!(Money::from_minor(-250).format_with_symbol("$"), "-$2.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!(a + b, Money::from_major(15));
        assert_eq!(a - b, Money::from_major(5));
        assert_eq!(b - a, Money::from_major(-5));
    }

    #[test]
    fn test_no_float_drift() {
        // 0.1 added ten times is exactly one
        let total: Money = std::iter::repeat(Money::new(dec!(0.1))).take(10).sum();
        assert_eq!(total, Money::from_major(1));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap(), Money::from_minor(1050));
        assert_eq!(Money::parse("$10.50").unwrap(), Money::from_minor(1050));
        assert_eq!(Money::parse("₹1,200").unwrap(), Money::from_major(1200));
        assert_eq!(Money::parse("-10.50").unwrap(), Money::from_minor(-1050));
        assert_eq!(Money::parse("  10 ").unwrap(), Money::from_major(10));
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert!(Money::parse("ten").is_err());
    }

    #[test]
    fn test_percent_of() {
        let part = Money::from_major(38000);
        let whole = Money::from_major(50000);
        assert_eq!(part.percent_of(whole), Some(dec!(76)));
        assert_eq!(part.percent_of(Money::zero()), None);
    }

    #[test]
    fn test_json_numbers() {
        let m: Money = serde_json::from_str("12000").unwrap();
        assert_eq!(m, Money::from_major(12000));

        let m: Money = serde_json::from_str("12.25").unwrap();
        assert_eq!(m, Money::new(dec!(12.25)));

        let json = serde_json::to_string(&Money::new(dec!(99.5))).unwrap();
        assert_eq!(json, "99.5");
    }
}
