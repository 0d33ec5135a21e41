//! Property-based tests for bill computation.
//!
//! - Property 1: Line formulas and non-negativity
//! - Property 2: Aggregation formulas and whole-rupee total
//! - Property 3: Aggregation is deterministic
//! - Property 4: GST split loses no paisa

use agrobill_shared::types::RoundingMode;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::gst::{SupplyType, split_gst};
use super::line_item::{LineItem, Quantity};
use super::totals::compute_order_totals_with;

/// Strategy for unit prices (0.00 to 99,999.99).
fn unit_price() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for GST rates (0 to 100, two decimals).
fn gst_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        Just(Decimal::from(5)),
        Just(Decimal::from(12)),
        Just(Decimal::from(18)),
        Just(Decimal::from(28)),
        (0i64..=10_000i64).prop_map(|v| Decimal::new(v, 2)),
    ]
}

fn rounding() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![Just(RoundingMode::HalfUp), Just(RoundingMode::HalfEven)]
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (unit_price(), 0i64..1_000, gst_rate()).prop_filter_map("valid line", |(price, qty, rate)| {
        LineItem::new(price, Quantity::Count(qty), rate).ok()
    })
}

fn has_at_most_two_decimals(value: Decimal) -> bool {
    value.round_dp(2) == value
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Property 1: Line formulas and non-negativity
    // =========================================================================

    /// *For any* valid line, gst = round2(price × qty × rate / 100) and
    /// total = round2(price × qty) + gst, all non-negative.
    #[test]
    fn prop_line_formulas(item in line_item(), mode in rounding()) {
        let line = item.breakdown(mode);
        let taxable = item.unit_price() * Decimal::from(item.quantity());
        let expected_gst = mode.round2(taxable * item.gst_rate() / Decimal::ONE_HUNDRED);

        prop_assert_eq!(line.taxable_amount.amount(), mode.round2(taxable));
        prop_assert_eq!(line.gst_amount.amount(), expected_gst);
        prop_assert_eq!(line.line_total.amount(), line.taxable_amount.amount() + line.gst_amount.amount());
        prop_assert!(line.gst_amount.amount() >= Decimal::ZERO);
        prop_assert!(line.line_total.amount() >= line.taxable_amount.amount());
        prop_assert!(has_at_most_two_decimals(line.line_total.amount()));
    }

    /// *For any* packed quantity, the resolved count is unit × carton.
    #[test]
    fn prop_packed_quantity(unit in 0i64..500, carton in 0i64..500) {
        let item = LineItem::new(Decimal::ONE, Quantity::packed(Some(unit), Some(carton)), Decimal::ZERO);
        prop_assert_eq!(item.map(|i| i.quantity()).ok(), u64::try_from(unit * carton).ok());
    }

    // =========================================================================
    // Property 2: Aggregation formulas
    // =========================================================================

    /// *For any* list of lines, total = round_whole(sub_total + gst) and
    /// round_off = total - (sub_total + gst).
    #[test]
    fn prop_totals_formulas(items in prop::collection::vec(line_item(), 0..20), mode in rounding()) {
        let totals = compute_order_totals_with(&items, mode);

        let taxable: Decimal = items.iter().map(LineItem::taxable_amount).sum();
        let gst: Decimal = items.iter().map(|i| i.breakdown(mode).gst_amount.amount()).sum();
        prop_assert_eq!(totals.sub_total.amount(), mode.round2(taxable));
        prop_assert_eq!(totals.total_gst.amount(), mode.round2(gst));

        let raw = totals.sub_total.amount() + totals.total_gst.amount();
        prop_assert_eq!(totals.total.amount(), mode.round_whole(raw));
        prop_assert_eq!(totals.round_off, totals.total.amount() - raw);
        prop_assert_eq!(totals.total.amount().fract(), Decimal::ZERO);
        prop_assert!(totals.round_off.abs() <= Decimal::new(5, 1));
    }

    // =========================================================================
    // Property 3: Determinism
    // =========================================================================

    /// *For any* list of lines, aggregating twice gives the same totals.
    #[test]
    fn prop_totals_idempotent(items in prop::collection::vec(line_item(), 0..20), mode in rounding()) {
        prop_assert_eq!(
            compute_order_totals_with(&items, mode),
            compute_order_totals_with(&items, mode)
        );
    }

    // =========================================================================
    // Property 4: GST split
    // =========================================================================

    /// *For any* GST amount, the components add back up and CGST equals SGST
    /// or exceeds it by one paisa.
    #[test]
    fn prop_split_adds_up(item in line_item()) {
        let gst = item.breakdown(RoundingMode::HalfUp).gst_amount;

        let intra = split_gst(gst, SupplyType::IntraState);
        prop_assert_eq!(intra.total(), gst);
        prop_assert!(intra.igst.is_zero());
        let diff = intra.cgst.amount() - intra.sgst.amount();
        prop_assert!(diff == Decimal::ZERO || diff == Decimal::new(1, 2));

        let inter = split_gst(gst, SupplyType::InterState);
        prop_assert_eq!(inter.igst, gst);
        prop_assert_eq!(inter.total(), gst);
    }
}
