use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use crate::errors::{AmortizationError, Result};

/// decimal places every stored monetary amount is rounded to
pub const MONEY_DP: u32 = 2;

/// largest scale a `Decimal` can carry
const MAX_SCALE: u32 = 28;

/// Round towards positive infinity at the given number of decimal places.
///
/// `round_up(x, p)` is `ceil(x * 10^p) / 10^p` for `p >= 0` and
/// `ceil(x / 10^|p|) * 10^|p|` for negative `p`. This is not half-up rounding:
/// 1083.331 becomes 1083.34.
pub fn round_up(value: Decimal, places: i32) -> Decimal {
    if places >= 0 {
        return value.round_dp_with_strategy(places as u32, RoundingStrategy::ToPositiveInfinity);
    }

    let factor = pow10(places.unsigned_abs());
    (value / factor).ceil().checked_mul(factor).unwrap_or(value)
}

/// Format with grouped thousands and a fixed number of decimals, e.g. `1,086.17`.
///
/// Rounds half away from zero before formatting.
pub fn format_number(value: Decimal, places: u32) -> String {
    let places = places.min(MAX_SCALE);
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);

    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

fn pow10(exponent: u32) -> Decimal {
    (0..exponent.min(MAX_SCALE)).fold(Decimal::ONE, |acc, _| acc * Decimal::TEN)
}

/// Money amount backed by an exact decimal.
///
/// Arithmetic is exact; rounding only happens where the schedule asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    /// smallest unit at `MONEY_DP` places
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, MONEY_DP));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> std::result::Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str_exact(s.trim())?))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        Money(Decimal::new(amount, scale.min(MAX_SCALE)))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round towards positive infinity, see [`round_up`]
    pub fn round_up(&self, dp: u32) -> Self {
        Money(round_up(self.0, dp.min(MAX_SCALE) as i32))
    }

    /// ordinary half-away-from-zero rounding, used to normalise inputs
    pub fn round_half_up(&self, dp: u32) -> Self {
        Money(self.0.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// `None` when the sum does not fit in a `Decimal`
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// grouped display string, e.g. `65,000.00`
    pub fn format(&self, places: u32) -> String {
        format_number(self.0, places)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money(self.0 * other)
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money(self.0 / other)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}

/// Interest rate charged per payment period.
///
/// Held as the annual percentage and the number of periods per year so that
/// interest on a balance can be computed with the division last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicRate {
    annual_percentage: Decimal,
    periods_per_year: u32,
}

impl PeriodicRate {
    pub const ZERO: PeriodicRate = PeriodicRate {
        annual_percentage: Decimal::ZERO,
        periods_per_year: 1,
    };

    /// create from an annual percentage (20 for 20%) split over `periods_per_year`
    pub fn new(annual_percentage: Decimal, periods_per_year: u32) -> Result<Self> {
        if periods_per_year == 0 {
            return Err(AmortizationError::invalid_parameters(
                "number of payments per year must be positive",
            ));
        }
        Ok(Self {
            annual_percentage,
            periods_per_year,
        })
    }

    /// create from a raw periodic rate (0.01 for 1% per period)
    pub fn from_decimal(rate: Decimal) -> Self {
        Self {
            annual_percentage: rate * Decimal::ONE_HUNDRED,
            periods_per_year: 1,
        }
    }

    /// `(annual / periods) / 100`
    pub fn as_decimal(&self) -> Decimal {
        self.annual_percentage / Decimal::from(self.periods_per_year) / Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.annual_percentage.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.annual_percentage.is_sign_negative() && !self.annual_percentage.is_zero()
    }

    /// Unrounded interest accrued on `balance` over one period.
    ///
    /// Falls back to the pre-divided periodic rate when `balance * annual`
    /// does not fit, and fails only when the interest itself does not.
    pub fn interest_on(&self, balance: Money) -> Result<Money> {
        let divisor = Decimal::from(self.periods_per_year) * Decimal::ONE_HUNDRED;
        balance
            .0
            .checked_mul(self.annual_percentage)
            .and_then(|product| product.checked_div(divisor))
            .or_else(|| balance.0.checked_mul(self.as_decimal()))
            .map(Money)
            .ok_or_else(|| AmortizationError::overflow(format!("interest on {} at {}", balance, self)))
    }
}

impl fmt::Display for PeriodicRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% / {}", self.annual_percentage, self.periods_per_year)
    }
}
