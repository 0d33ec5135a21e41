//! Money type with fixed two-decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts arriving from the API as `f64` are converted once, at the edge,
//! through [`Money::from_f64_lenient`].

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places carried by every [`Money`] value (paise).
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Errors raised when constructing a [`Money`] value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Money amounts are never negative.
    #[error("Amount cannot be negative: {0}")]
    Negative(Decimal),
}

/// Rounding policy applied to paise and whole-rupee rounding.
///
/// Bills have always been rounded half-up (`2.5 -> 3`). Half-even exists for
/// shops whose accountant asks for it; it is opt-in through configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero.
    #[default]
    HalfUp,
    /// Banker's rounding (round half to even).
    HalfEven,
}

impl RoundingMode {
    /// Returns the matching `rust_decimal` strategy.
    #[must_use]
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Rounds `value` to `decimal_places` using this policy.
    #[must_use]
    pub fn round(self, value: Decimal, decimal_places: u32) -> Decimal {
        value.round_dp_with_strategy(decimal_places, self.strategy())
    }

    /// Rounds to two decimal places (paise).
    #[must_use]
    pub fn round2(self, value: Decimal) -> Decimal {
        self.round(value, MONEY_DECIMAL_PLACES)
    }

    /// Rounds to the nearest whole rupee.
    #[must_use]
    pub fn round_whole(self, value: Decimal) -> Decimal {
        self.round(value, 0)
    }
}

/// A non-negative monetary amount in rupees with exactly two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero rupees, at two decimal places like every other value.
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, MONEY_DECIMAL_PLACES));

    /// Creates a Money value, rounding half-up to two decimals.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Negative` for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        Self::with_rounding(amount, RoundingMode::HalfUp)
    }

    /// Creates a Money value, rounding with the given policy.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Negative` for amounts below zero.
    pub fn with_rounding(amount: Decimal, mode: RoundingMode) -> Result<Self, MoneyError> {
        if amount < Decimal::ZERO {
            return Err(MoneyError::Negative(amount));
        }
        let mut rounded = mode.round2(amount);
        rounded.rescale(MONEY_DECIMAL_PLACES);
        Ok(Self(rounded))
    }

    /// Converts an API-supplied double, substituting zero for NaN, infinite,
    /// negative, or out-of-range input.
    #[must_use]
    pub fn from_f64_lenient(value: f64) -> Self {
        Decimal::from_f64(value)
            .and_then(|amount| Self::new(amount).ok())
            .unwrap_or(Self::ZERO)
    }

    /// Returns the amount as a decimal.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Adds `other`, returning `None` if the sum does not fit a `Decimal`.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtracts `other`, stopping at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        if other.0 >= self.0 {
            Self::ZERO
        } else {
            Self(self.0 - other.0)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_new() {
        let money = Money::new(dec!(100.5)).unwrap();
        assert_eq!(money.amount(), dec!(100.50));
        assert_eq!(money.to_string(), "100.50");
    }

    #[test]
    fn test_money_rejects_negative() {
        assert_eq!(
            Money::new(dec!(-0.01)),
            Err(MoneyError::Negative(dec!(-0.01)))
        );
    }

    #[test]
    fn test_money_rounds_half_up() {
        assert_eq!(Money::new(dec!(2.345)).unwrap().amount(), dec!(2.35));
        assert_eq!(
            Money::with_rounding(dec!(2.345), RoundingMode::HalfEven)
                .unwrap()
                .amount(),
            dec!(2.34)
        );
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    #[case(f64::MIN)]
    fn test_from_f64_lenient_falls_back_to_zero(#[case] value: f64) {
        assert_eq!(Money::from_f64_lenient(value), Money::ZERO);
    }

    #[test]
    fn test_from_f64_lenient_keeps_valid_amounts() {
        assert_eq!(Money::from_f64_lenient(1785.0).amount(), dec!(1785.00));
        assert_eq!(Money::from_f64_lenient(0.1).amount(), dec!(0.10));
    }

    #[test]
    fn test_money_sum_and_saturating_sub() {
        let a = Money::new(dec!(10.25)).unwrap();
        let b = Money::new(dec!(4.75)).unwrap();
        let total: Money = [a, b].into_iter().sum();
        assert_eq!(total.amount(), dec!(15.00));
        assert_eq!(b.saturating_sub(a), Money::ZERO);
        assert_eq!(a.saturating_sub(b).amount(), dec!(5.50));
    }

    #[rstest]
    #[case(RoundingMode::HalfUp, dec!(2.5), dec!(3))]
    #[case(RoundingMode::HalfUp, dec!(3.5), dec!(4))]
    #[case(RoundingMode::HalfEven, dec!(2.5), dec!(2))]
    #[case(RoundingMode::HalfEven, dec!(3.5), dec!(4))]
    fn test_round_whole(
        #[case] mode: RoundingMode,
        #[case] value: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(mode.round_whole(value), expected);
    }

    #[test]
    fn test_zero_keeps_two_decimals() {
        assert_eq!(Money::ZERO.amount().scale(), MONEY_DECIMAL_PLACES);
        assert_eq!(Decimal::from(Money::default()).to_string(), "0.00");
        assert_eq!(Money::default(), Money::new(dec!(0)).unwrap());
    }

    #[test]
    fn test_checked_add_reports_overflow() {
        let a = Money::new(dec!(10.25)).unwrap();
        assert_eq!(a.checked_add(a).map(Money::amount), Some(dec!(20.50)));

        let huge = Money::new(Decimal::MAX).unwrap();
        assert_eq!(huge.checked_add(a), None);
    }

    #[test]
    fn test_money_deserialize_validates() {
        let ok: Result<Money, _> = Money::try_from(dec!(5));
        assert!(ok.is_ok());
        let err: Result<Money, _> = Money::try_from(dec!(-5));
        assert!(err.is_err());
    }
}
