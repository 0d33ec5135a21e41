//! Order aggregation.
//!
//! IMPORTANT: the grand total is rounded to whole rupees and the difference is
//! carried in `round_off`. Printed bills and the accounts already filed depend
//! on this; do not "fix" it to keep paise in the total.

use agrobill_shared::types::{Money, RoundingMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::{LineItem, to_money};

/// Totals of an order or purchase order.
///
/// `total == sub_total + total_gst + round_off` and `total` is a whole number
/// of rupees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// `round2(Σ unit_price × quantity)`.
    pub sub_total: Money,
    /// `round2(Σ gst_amount)`.
    pub total_gst: Money,
    /// Signed adjustment that brings the raw total to whole rupees.
    pub round_off: Decimal,
    /// Amount payable.
    pub total: Money,
}

impl OrderTotals {
    /// All-zero totals, as for an order without lines.
    pub const ZERO: Self = Self {
        sub_total: Money::ZERO,
        total_gst: Money::ZERO,
        round_off: Money::ZERO.amount(),
        total: Money::ZERO,
    };

    /// `sub_total + total_gst`, before whole-rupee rounding.
    #[must_use]
    pub fn raw_total(&self) -> Decimal {
        self.sub_total.amount() + self.total_gst.amount()
    }
}

/// Aggregates line items with the default (half-up) rounding.
#[must_use]
pub fn compute_order_totals(items: &[LineItem]) -> OrderTotals {
    compute_order_totals_with(items, RoundingMode::default())
}

/// Aggregates line items with an explicit rounding policy.
///
/// The sub-total is rounded once over the unrounded line amounts; GST is the
/// sum of the already-rounded per-line GST amounts.
#[must_use]
pub fn compute_order_totals_with(items: &[LineItem], mode: RoundingMode) -> OrderTotals {
    if items.is_empty() {
        return OrderTotals::ZERO;
    }

    let (taxable, gst) = items.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(taxable, gst), item| {
            let line = item.breakdown(mode);
            (
                taxable + item.taxable_amount(),
                gst + line.gst_amount.amount(),
            )
        },
    );

    let sub_total = to_money(taxable, mode);
    let total_gst = to_money(gst, mode);
    let raw_total = sub_total.amount() + total_gst.amount();
    let total = to_money(mode.round_whole(raw_total), mode);

    OrderTotals {
        sub_total,
        total_gst,
        round_off: total.amount() - raw_total,
        total,
    }
}
