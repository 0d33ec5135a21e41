//! Inventory error types.

use agrobill_shared::AppError;
use agrobill_shared::types::VariantId;
use thiserror::Error;

/// Errors that can occur while moving stock.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// A sale asks for more than is on hand.
    #[error("Insufficient stock for variant {variant_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Variant being sold.
        variant_id: VariantId,
        /// Units the order takes.
        requested: u64,
        /// Units on hand.
        available: i64,
    },

    /// A line quantity does not fit in a stock level.
    #[error("Quantity too large for variant {variant_id}: {quantity}")]
    QuantityTooLarge {
        /// Variant being moved.
        variant_id: VariantId,
        /// Offending quantity.
        quantity: u64,
    },
}

impl InventoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::QuantityTooLarge { .. } => "QUANTITY_TOO_LARGE",
        }
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InsufficientStock { .. } => Self::Conflict(err.to_string()),
            InventoryError::QuantityTooLarge { .. } => Self::InvalidInput(err.to_string()),
        }
    }
}
