//! Report error types.

use agrobill_shared::AppError;
use agrobill_shared::types::OrderId;
use chrono::NaiveDate;
use thiserror::Error;

/// Report-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Date string is not RFC 3339, `YYYY-MM-DDTHH:MM:SS`, or `YYYY-MM-DD`.
    #[error("Malformed date: {0}")]
    MalformedDate(String),

    /// Period tag is not one of the known periods.
    #[error("Unknown report period: {0}")]
    UnknownPeriod(String),

    /// Custom range ends before it starts.
    #[error("Date range ends ({end}) before it starts ({start})")]
    InvertedRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// Adding an order's amounts overflows the running totals.
    #[error("Totals overflow at order {0}")]
    SumOverflow(OrderId),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedDate(_) => "MALFORMED_DATE",
            Self::UnknownPeriod(_) => "UNKNOWN_PERIOD",
            Self::InvertedRange { .. } => "INVERTED_RANGE",
            Self::SumOverflow(_) => "SUM_OVERFLOW",
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
