//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. The persisted documents carry plain JSON numbers in currency units
//! (`12.5`), so serialization converts at the boundary and rounds to the
//! nearest cent on the way in.
//!
//! Parsed and deserialized amounts are limited to [`MAX_UNITS`] in magnitude.
//! Arithmetic saturates at the `i64` bounds instead of overflowing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest accepted amount, in whole currency units (one trillion)
pub const MAX_UNITS: i64 = 1_000_000_000_000;

const MAX_CENTS: i64 = MAX_UNITS * 100;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use finance_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a Money amount from a floating point number of currency units,
    /// rounding to the nearest cent
    ///
    /// Values outside the `i64` cent range saturate; use the deserializer or
    /// [`Money::parse`] for range-checked input.
    pub fn from_units_f64(units: f64) -> Self {
        Self((units * 100.0).round() as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount in currency units as a float (for ratios and display)
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Express `self` as a percentage of `whole`
    ///
    /// Returns `None` when `whole` is zero. The quotient is taken over integer
    /// cents, so results that are whole or exactly representable (75.0, 90.0)
    /// come out exact.
    pub fn percent_of(&self, whole: Money) -> Option<f64> {
        if whole.is_zero() {
            return None;
        }
        Some((self.0 as f64 * 100.0) / whole.0 as f64)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "1,234.50", "10", ".5".
    /// More than two decimal places are rounded half-up to the cent.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let digits: String = rest.chars().filter(|c| *c != ',').collect();

        let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let frac_digits: Vec<i64> = frac.bytes().map(|b| (b - b'0') as i64).collect();
        let mut cents = frac_digits.first().copied().unwrap_or(0) * 10
            + frac_digits.get(1).copied().unwrap_or(0);
        if frac_digits.get(2).copied().unwrap_or(0) >= 5 {
            cents += 1;
        }

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(|| MoneyParseError::OutOfRange(trimmed.to_string()))?;

        if total > MAX_CENTS {
            return Err(MoneyParseError::OutOfRange(trimmed.to_string()));
        }

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol and thousands separators, e.g. `$1,234.56`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let digits = self.dollars().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, symbol, grouped, self.cents_part())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.is_negative() {
            format!("-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            format!("${}.{:02}", self.dollars(), self.cents_part())
        };
        // `pad` keeps width/alignment specifiers working in table layouts
        f.pad(&text)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let units = f64::deserialize(deserializer)?;
        if !units.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        if units.abs() > MAX_UNITS as f64 {
            return Err(serde::de::Error::custom(format!(
                "amount {} exceeds the maximum of {}",
                units, MAX_UNITS
            )));
        }
        Ok(Money::from_units_f64(units))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount format: '{}'", s),
            MoneyParseError::OutOfRange(s) => {
                write!(f, "Amount '{}' exceeds the maximum of {}", s, MAX_UNITS)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}
