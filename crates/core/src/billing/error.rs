//! Billing error types.

use agrobill_shared::AppError;
use agrobill_shared::types::{Money, OrderId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::access::AccessError;

/// Errors that can occur while pricing lines or building orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    // ========== Invalid Input ==========
    /// Unit price cannot be negative.
    #[error("Unit price cannot be negative: {0}")]
    NegativeUnitPrice(Decimal),

    /// Quantity, unit, or carton factor cannot be negative.
    #[error("Quantity cannot be negative: {0}")]
    NegativeQuantity(i64),

    /// Unit times carton does not fit in a quantity.
    #[error("Quantity overflows: {unit} x {carton}")]
    QuantityOverflow {
        /// Units per carton.
        unit: i64,
        /// Number of cartons.
        carton: i64,
    },

    /// GST rate must be a percentage between 0 and 100.
    #[error("GST rate must be between 0 and 100, got {0}")]
    GstRateOutOfRange(Decimal),

    /// Line amount exceeds what a single bill line may carry.
    #[error("Line amount too large: {0}")]
    AmountTooLarge(Decimal),

    // ========== Order State ==========
    /// No line at the given position.
    #[error("No line item at position {0}")]
    LineNotFound(usize),

    /// An order needs at least one line item before it can be finalized.
    #[error("Order has no line items")]
    EmptyOrder,

    /// Refunded orders take no further payments.
    #[error("Order {0} has been refunded")]
    OrderRefunded(OrderId),

    /// A running amount no longer fits a decimal.
    #[error("Amount overflows: {0} + {1}")]
    AmountOverflow(Money, Money),

    // ========== Access ==========
    /// The staff context may not perform this operation.
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl BillingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeUnitPrice(_) => "NEGATIVE_UNIT_PRICE",
            Self::NegativeQuantity(_) => "NEGATIVE_QUANTITY",
            Self::QuantityOverflow { .. } => "QUANTITY_OVERFLOW",
            Self::GstRateOutOfRange(_) => "GST_RATE_OUT_OF_RANGE",
            Self::AmountTooLarge(_) => "AMOUNT_TOO_LARGE",
            Self::LineNotFound(_) => "LINE_NOT_FOUND",
            Self::EmptyOrder => "EMPTY_ORDER",
            Self::OrderRefunded(_) => "ORDER_REFUNDED",
            Self::AmountOverflow(..) => "AMOUNT_OVERFLOW",
            Self::Access(err) => err.error_code(),
        }
    }

    /// Returns true for the `InvalidInput` family (bad price, quantity, or rate).
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::NegativeUnitPrice(_)
                | Self::NegativeQuantity(_)
                | Self::QuantityOverflow { .. }
                | Self::GstRateOutOfRange(_)
                | Self::AmountTooLarge(_)
        )
    }
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::Access(access) => access.into(),
            BillingError::LineNotFound(_) => Self::NotFound(err.to_string()),
            BillingError::EmptyOrder => Self::Validation(err.to_string()),
            BillingError::OrderRefunded(_) => Self::Conflict(err.to_string()),
            _ => Self::InvalidInput(err.to_string()),
        }
    }
}
