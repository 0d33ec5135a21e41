//! Payment status and payment type.
//!
//! The payment type printed on a bill is derived from the order's payment
//! status by a fixed table:
//!
//! | status   | type    |
//! |----------|---------|
//! | paid     | full    |
//! | overpaid | advance |
//! | partial  | partial |
//! | refunded | partial |
//! | unpaid   | full    |
//!
//! Unknown status tags fall back to `full`.

use agrobill_shared::types::Money;
use serde::{Deserialize, Serialize};

/// Settlement state of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Paid in full.
    Paid,
    /// Nothing paid yet.
    #[default]
    Unpaid,
    /// Paid in part.
    Partial,
    /// Paid more than the total.
    Overpaid,
    /// Money returned to the customer.
    Refunded,
}

impl PaymentStatus {
    /// Derives the status from the bill total and the amount received.
    #[must_use]
    pub fn from_amounts(total: Money, paid: Money) -> Self {
        if paid.is_zero() && !total.is_zero() {
            Self::Unpaid
        } else if paid < total {
            Self::Partial
        } else if paid == total {
            Self::Paid
        } else {
            Self::Overpaid
        }
    }

    /// Parses a stored status tag, case-insensitively.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "paid" => Some(Self::Paid),
            "unpaid" => Some(Self::Unpaid),
            "partial" => Some(Self::Partial),
            "overpaid" => Some(Self::Overpaid),
            "refunded" => Some(Self::Refunded),
            _ => None,
        }
    }

    /// Payment type for this status.
    #[must_use]
    pub const fn payment_type(self) -> PaymentType {
        payment_status_to_type(self)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "paid"),
            Self::Unpaid => write!(f, "unpaid"),
            Self::Partial => write!(f, "partial"),
            Self::Overpaid => write!(f, "overpaid"),
            Self::Refunded => write!(f, "refunded"),
        }
    }
}

/// How an order was settled, as printed on the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Settled in one payment.
    Full,
    /// Customer paid ahead of billing.
    Advance,
    /// Settled over several payments.
    Partial,
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Advance => write!(f, "advance"),
            Self::Partial => write!(f, "partial"),
        }
    }
}

impl From<PaymentStatus> for PaymentType {
    fn from(status: PaymentStatus) -> Self {
        payment_status_to_type(status)
    }
}

/// Maps a payment status to its payment type.
#[must_use]
pub const fn payment_status_to_type(status: PaymentStatus) -> PaymentType {
    match status {
        PaymentStatus::Overpaid => PaymentType::Advance,
        PaymentStatus::Partial | PaymentStatus::Refunded => PaymentType::Partial,
        PaymentStatus::Paid | PaymentStatus::Unpaid => PaymentType::Full,
    }
}

/// Maps a stored status tag to a payment type; unknown tags give `Full`.
#[must_use]
pub fn payment_type_for_tag(tag: &str) -> PaymentType {
    PaymentStatus::from_tag(tag).map_or_else(
        || {
            tracing::debug!(tag, "unknown payment status, defaulting to full");
            PaymentType::Full
        },
        payment_status_to_type,
    )
}
