//! Bill computation.
//!
//! This module implements the pricing rules every bill in the shop follows:
//! - Line items (unit price, quantity, GST rate)
//! - Order totals with whole-rupee rounding
//! - CGST/SGST/IGST split and rate-wise GST summary
//! - Order drafts, finalization and payments
//! - Error types for billing operations

pub mod error;
pub mod gst;
pub mod line_item;
pub mod order;
pub mod totals;

#[cfg(test)]
mod props;

pub use error::BillingError;
pub use gst::{GstRateSummary, GstSplit, SupplyType, split_gst, summarize_by_rate};
pub use line_item::{
    LineBreakdown, LineItem, LineItemInput, Quantity, compute_line_item,
    compute_line_item_with,
};
pub use order::{Order, OrderDraft, OrderKind, Party};
pub use totals::{OrderTotals, compute_order_totals, compute_order_totals_with};
