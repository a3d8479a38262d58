//! Money type for prices and cart totals.
//!
//! Amounts are held as integer centimes so totals never accumulate
//! floating-point error. The shop sells in a single currency (Moroccan
//! dirham); only the display format is configurable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// Centimes per dirham.
const CENTIMES_PER_UNIT: i64 = 100;

/// How amounts are rendered for the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Appended after the grouped amount (e.g. `" DH"`).
    pub suffix: String,
    /// Inserted between groups of three digits.
    pub group_separator: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            suffix: " DH".to_string(),
            // fr-FR grouping uses a narrow no-break space.
            group_separator: "\u{202f}".to_string(),
        }
    }
}

/// A non-negative monetary value.
///
/// Serialized as a plain JSON number of dirhams (`119`, `119.5`) so the
/// persisted cart keeps the `price: number` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Money {
    /// Amount in centimes.
    pub amount_centimes: i64,
}

impl Money {
    /// Create a Money value from centimes. Negative amounts become zero.
    pub fn new(amount_centimes: i64) -> Self {
        Self {
            amount_centimes: amount_centimes.max(0),
        }
    }

    /// Create a Money value from a decimal amount of dirhams.
    ///
    /// NaN, infinite and negative inputs coerce to zero.
    ///
    /// ```
    /// use casaperf_commerce::money::Money;
    /// assert_eq!(Money::from_decimal(49.99).amount_centimes, 4999);
    /// assert_eq!(Money::from_decimal(f64::NAN), Money::zero());
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() || amount <= 0.0 {
            return Self::zero();
        }
        // `as` saturates on overflow.
        Self::new((amount * CENTIMES_PER_UNIT as f64).round() as i64)
    }

    /// Zero dirhams.
    pub fn zero() -> Self {
        Self { amount_centimes: 0 }
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_centimes == 0
    }

    /// Convert to a decimal amount of dirhams.
    pub fn to_decimal(&self) -> f64 {
        self.amount_centimes as f64 / CENTIMES_PER_UNIT as f64
    }

    /// Whole dirhams, rounding half away from zero.
    pub fn rounded_units(&self) -> i64 {
        self.amount_centimes.saturating_add(CENTIMES_PER_UNIT / 2) / CENTIMES_PER_UNIT
    }

    /// Multiply by a quantity, saturating instead of overflowing.
    pub fn multiply(&self, factor: u32) -> Money {
        Money::new(self.amount_centimes.saturating_mul(i64::from(factor)))
    }

    /// Sum an iterator of Money values, saturating instead of overflowing.
    pub fn sum<I: IntoIterator<Item = Money>>(iter: I) -> Money {
        iter.into_iter().fold(Money::zero(), |acc, m| acc + m)
    }

    /// Format with the given currency format: grouped whole units, no
    /// decimals, suffix (e.g. `"1 234 DH"`).
    pub fn format(&self, currency: &CurrencyFormat) -> String {
        let digits = self.rounded_units().to_string();
        let mut grouped = String::with_capacity(digits.len() + currency.suffix.len() + 4);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&currency.group_separator);
            }
            grouped.push(ch);
        }
        grouped.push_str(&currency.suffix);
        grouped
    }

    /// Format with the default dirham format.
    pub fn display(&self) -> String {
        self.format(&CurrencyFormat::default())
    }
}

impl From<f64> for Money {
    fn from(amount: f64) -> Self {
        Money::from_decimal(amount)
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_centimes.saturating_add(other.amount_centimes))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, factor: u32) -> Money {
        self.multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
