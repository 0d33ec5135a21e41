//! Display formatting for amounts and counts.

pub mod currency;

pub use currency::{CurrencyFormatter, RUPEE_SYMBOL, format_count, format_currency, format_money};
