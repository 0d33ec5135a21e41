//! Sales summary over a set of orders.

use agrobill_shared::types::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use crate::billing::Order;
use crate::payment::PaymentStatus;

/// Dashboard totals for a set of orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// Number of orders.
    pub order_count: usize,
    /// Sum of order sub-totals.
    pub sub_total: Money,
    /// Sum of order GST.
    pub total_gst: Money,
    /// Sum of round-off adjustments.
    pub round_off: Decimal,
    /// Sum of order totals.
    pub grand_total: Money,
    /// Sum of amounts received.
    pub collected: Money,
    /// Sum of balances still due. Refunded orders owe nothing.
    pub outstanding: Money,
}

impl Default for SalesSummary {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl SalesSummary {
    /// Summary of no orders.
    pub const EMPTY: Self = Self {
        order_count: 0,
        sub_total: Money::ZERO,
        total_gst: Money::ZERO,
        round_off: Money::ZERO.amount(),
        grand_total: Money::ZERO,
        collected: Money::ZERO,
        outstanding: Money::ZERO,
    };

    /// Sums the frozen totals of `orders`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::SumOverflow` naming the first order whose
    /// amounts no longer fit the running totals.
    pub fn from_orders<'a, I>(orders: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = &'a Order>,
    {
        orders.into_iter().try_fold(Self::EMPTY, |acc, order| {
            acc.add_order(order).ok_or_else(|| {
                tracing::warn!(order_id = %order.id(), "order totals overflow the summary");
                ReportError::SumOverflow(order.id())
            })
        })
    }

    fn add_order(self, order: &Order) -> Option<Self> {
        let totals = order.totals();
        let outstanding = if order.payment_status() == PaymentStatus::Refunded {
            self.outstanding
        } else {
            self.outstanding.checked_add(order.balance_due())?
        };
        Some(Self {
            order_count: self.order_count + 1,
            sub_total: self.sub_total.checked_add(totals.sub_total)?,
            total_gst: self.total_gst.checked_add(totals.total_gst)?,
            round_off: self.round_off.checked_add(totals.round_off)?,
            grand_total: self.grand_total.checked_add(totals.total)?,
            collected: self.collected.checked_add(order.amount_paid())?,
            outstanding,
        })
    }
}
