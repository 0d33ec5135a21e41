//! GST breakdowns for tax invoices and returns.
//!
//! Intra-state supplies carry CGST and SGST in equal halves; inter-state
//! supplies carry IGST only. Splitting never loses a paisa: the odd paisa of
//! an uneven split goes to CGST, so `cgst + sgst + igst == gst` always holds.

use std::collections::BTreeMap;

use agrobill_shared::types::{Money, RoundingMode};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::line_item::{LineItem, to_money};

/// Whether the buyer is in the seller's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyType {
    /// Same state: CGST + SGST.
    IntraState,
    /// Different states: IGST.
    InterState,
}

impl SupplyType {
    /// Decides the supply type from two state codes (e.g. the first two digits
    /// of each GSTIN). Comparison ignores case and surrounding whitespace.
    #[must_use]
    pub fn for_states(seller_state: &str, buyer_state: &str) -> Self {
        if seller_state.trim().eq_ignore_ascii_case(buyer_state.trim()) {
            Self::IntraState
        } else {
            Self::InterState
        }
    }
}

/// GST divided into its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstSplit {
    /// Central GST.
    pub cgst: Money,
    /// State GST.
    pub sgst: Money,
    /// Integrated GST.
    pub igst: Money,
}

impl GstSplit {
    /// Sum of all components.
    #[must_use]
    pub fn total(&self) -> Money {
        self.cgst + self.sgst + self.igst
    }
}

/// Splits a GST amount by supply type.
#[must_use]
pub fn split_gst(gst: Money, supply: SupplyType) -> GstSplit {
    match supply {
        SupplyType::InterState => GstSplit {
            cgst: Money::ZERO,
            sgst: Money::ZERO,
            igst: gst,
        },
        SupplyType::IntraState => {
            let half = (gst.amount() / Decimal::TWO).round_dp_with_strategy(2, RoundingStrategy::ToZero);
            let sgst = to_money(half, RoundingMode::HalfUp);
            GstSplit {
                cgst: gst.saturating_sub(sgst),
                sgst,
                igst: Money::ZERO,
            }
        }
    }
}

/// Taxable value and GST collected at one rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstRateSummary {
    /// GST rate as a percentage.
    pub rate: Decimal,
    /// Taxable value of all lines at this rate.
    pub taxable_amount: Money,
    /// GST on those lines.
    pub gst_amount: Money,
}

/// Groups lines by GST rate, lowest rate first.
///
/// Per-rate amounts are sums of the rounded per-line amounts, so the GST
/// column adds up to the order's `total_gst`.
#[must_use]
pub fn summarize_by_rate<'a, I>(items: I, mode: RoundingMode) -> Vec<GstRateSummary>
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let mut by_rate: BTreeMap<Decimal, (Money, Money)> = BTreeMap::new();
    for item in items {
        let line = item.breakdown(mode);
        let entry = by_rate
            .entry(item.gst_rate().normalize())
            .or_insert((Money::ZERO, Money::ZERO));
        entry.0 += line.taxable_amount;
        entry.1 += line.gst_amount;
    }

    by_rate
        .into_iter()
        .map(|(rate, (taxable_amount, gst_amount))| GstRateSummary {
            rate,
            taxable_amount,
            gst_amount,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::line_item::Quantity;
    use rust_decimal_macros::dec;

    fn money(value: Decimal) -> Money {
        Money::new(value).unwrap()
    }

    #[test]
    fn test_supply_type_for_states() {
        assert_eq!(SupplyType::for_states("27", "27"), SupplyType::IntraState);
        assert_eq!(SupplyType::for_states(" mh", "MH "), SupplyType::IntraState);
        assert_eq!(SupplyType::for_states("27", "29"), SupplyType::InterState);
    }

    #[test]
    fn test_even_intra_state_split() {
        let split = split_gst(money(dec!(85.00)), SupplyType::IntraState);
        assert_eq!(split.cgst.amount(), dec!(42.50));
        assert_eq!(split.sgst.amount(), dec!(42.50));
        assert!(split.igst.is_zero());
    }

    #[test]
    fn test_odd_paisa_goes_to_cgst() {
        let split = split_gst(money(dec!(294.85)), SupplyType::IntraState);
        assert_eq!(split.cgst.amount(), dec!(147.43));
        assert_eq!(split.sgst.amount(), dec!(147.42));
        assert_eq!(split.total().amount(), dec!(294.85));
    }

    #[test]
    fn test_inter_state_is_all_igst() {
        let split = split_gst(money(dec!(294.85)), SupplyType::InterState);
        assert!(split.cgst.is_zero());
        assert!(split.sgst.is_zero());
        assert_eq!(split.igst.amount(), dec!(294.85));
    }

    #[test]
    fn test_split_sum_invariant() {
        for paise in 0..500_i64 {
            let gst = money(Decimal::new(paise, 2));
            let split = split_gst(gst, SupplyType::IntraState);
            assert_eq!(split.total(), gst, "split lost a paisa for {gst}");
        }
    }

    #[test]
    fn test_summarize_by_rate() {
        let items = vec![
            LineItem::new(dec!(850), Quantity::Count(2), dec!(5)).unwrap(),
            LineItem::new(dec!(45.50), Quantity::Count(36), dec!(18)).unwrap(),
            LineItem::new(dec!(300), Quantity::Count(1), dec!(5.0)).unwrap(),
            LineItem::new(dec!(120), Quantity::Count(3), dec!(0)).unwrap(),
        ];
        let summary = summarize_by_rate(&items, RoundingMode::HalfUp);

        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].rate, dec!(0));
        assert_eq!(summary[0].taxable_amount.amount(), dec!(360.00));
        assert_eq!(summary[1].rate, dec!(5));
        assert_eq!(summary[1].taxable_amount.amount(), dec!(2000.00));
        assert_eq!(summary[1].gst_amount.amount(), dec!(100.00));
        assert_eq!(summary[2].rate, dec!(18));
        assert_eq!(summary[2].gst_amount.amount(), dec!(294.84));
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize_by_rate(&[], RoundingMode::HalfUp).is_empty());
    }
}
