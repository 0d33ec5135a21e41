//! Dashboard reporting.
//!
//! Orders are bucketed into calendar periods in the shop's time zone and
//! summed into [`SalesSummary`] values. Unknown period tags never fail a
//! dashboard request; they filter nothing out.

pub mod error;
pub mod filter;
pub mod period;
pub mod summary;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use filter::{DateField, PeriodFilter, Timestamped};
pub use period::{DateWindow, ReportPeriod};
pub use summary::SalesSummary;
