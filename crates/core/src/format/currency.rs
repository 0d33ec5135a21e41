//! Rupee formatting with Indian digit grouping.
//!
//! Digits are grouped as the last three, then pairs: `12,34,567.00`.
//! Amounts are rounded half-up to paise before formatting.

use agrobill_shared::config::BillingConfig;
use agrobill_shared::types::{Money, RoundingMode};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Default currency symbol.
pub const RUPEE_SYMBOL: &str = "₹";

/// Formats amounts with a configurable symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    symbol: String,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(RUPEE_SYMBOL)
    }
}

impl CurrencyFormatter {
    /// Creates a formatter printing `symbol` before amounts.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Creates a formatter from billing settings.
    #[must_use]
    pub fn from_config(config: &BillingConfig) -> Self {
        Self::new(config.currency_symbol.clone())
    }

    /// Symbol printed before amounts.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Formats a double as sent by the API. NaN and infinite values print as
    /// zero.
    #[must_use]
    pub fn format_f64(&self, amount: f64, include_symbol: bool, fixed_point: bool) -> String {
        let value = if amount.is_finite() {
            Decimal::from_f64(amount).unwrap_or_else(|| {
                tracing::warn!(amount, "amount out of range, formatting as zero");
                Decimal::ZERO
            })
        } else {
            tracing::warn!(amount, "non-finite amount, formatting as zero");
            Decimal::ZERO
        };
        self.format_decimal(value, include_symbol, fixed_point)
    }

    /// Formats a decimal amount.
    ///
    /// With `fixed_point` exactly two decimals are printed; without it
    /// trailing zeros (and a bare decimal point) are dropped.
    #[must_use]
    pub fn format_decimal(&self, amount: Decimal, include_symbol: bool, fixed_point: bool) -> String {
        let rounded = RoundingMode::HalfUp.round2(amount);
        let text = format!("{:.2}", rounded.abs());
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let fraction = if fixed_point {
            fraction
        } else {
            fraction.trim_end_matches('0')
        };

        let mut out = String::with_capacity(text.len() + self.symbol.len() + 8);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        if include_symbol {
            out.push_str(&self.symbol);
        }
        out.push_str(&group_indian(whole));
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }

    /// Formats a money value.
    #[must_use]
    pub fn format_money(&self, amount: Money, include_symbol: bool, fixed_point: bool) -> String {
        self.format_decimal(amount.amount(), include_symbol, fixed_point)
    }
}

/// Formats a double in rupees. See [`CurrencyFormatter::format_f64`].
#[must_use]
pub fn format_currency(amount: f64, include_symbol: bool, fixed_point: bool) -> String {
    CurrencyFormatter::default().format_f64(amount, include_symbol, fixed_point)
}

/// Formats a money value in rupees.
#[must_use]
pub fn format_money(amount: Money, include_symbol: bool, fixed_point: bool) -> String {
    CurrencyFormatter::default().format_money(amount, include_symbol, fixed_point)
}

/// Formats a count with Indian grouping and no decimals.
#[must_use]
pub fn format_count(count: u64) -> String {
    group_indian(&count.to_string())
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}
