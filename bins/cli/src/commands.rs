//! Subcommand implementations.

use std::path::{Path, PathBuf};

use agrobill_core::billing::{
    GstRateSummary, GstSplit, LineBreakdown, LineItem, Order, OrderTotals, SupplyType,
    compute_order_totals_with, split_gst, summarize_by_rate,
};
use agrobill_core::format::CurrencyFormatter;
use agrobill_core::reports::{DateField, DateWindow, PeriodFilter, ReportPeriod, SalesSummary};
use agrobill_shared::AppConfig;
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Args, ValueEnum};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Arguments for `agrobill totals`.
#[derive(Debug, Args)]
pub struct TotalsArgs {
    /// JSON file with line items, either a bare array or `{"items": [...]}`.
    pub file: PathBuf,
}

/// Arguments for `agrobill report`.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// JSON file with an array of finalized orders.
    pub file: PathBuf,
    /// Period tag, e.g. `current-month` or `last-3-months`.
    #[arg(long, default_value = "current-month")]
    pub period: String,
    /// First day of a custom period.
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,
    /// Last day of a custom period.
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,
    /// Which order date decides the period.
    #[arg(long, value_enum, default_value_t = DateBasis::Captured)]
    pub by: DateBasis,
    /// Evaluate the period as of this date or timestamp instead of now.
    #[arg(long)]
    pub as_of: Option<String>,
}

/// Arguments for `agrobill format`.
#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Amount in rupees.
    #[arg(allow_hyphen_values = true)]
    pub amount: f64,
    /// Leave out the currency symbol.
    #[arg(long)]
    pub no_symbol: bool,
    /// Drop trailing zero decimals.
    #[arg(long)]
    pub no_fixed: bool,
}

/// Order date used for period bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateBasis {
    /// Capture date, falling back to creation time.
    Captured,
    /// Creation time.
    Created,
}

impl From<DateBasis> for DateField {
    fn from(basis: DateBasis) -> Self {
        match basis {
            DateBasis::Captured => Self::CaptureDate,
            DateBasis::Created => Self::CreatedAt,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TotalsInput {
    Items(Vec<LineItem>),
    Bill {
        items: Vec<LineItem>,
        #[serde(default)]
        supply: Option<SupplyType>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TotalsOutput {
    lines: Vec<LineBreakdown>,
    totals: OrderTotals,
    gst_split: GstSplit,
    gst_by_rate: Vec<GstRateSummary>,
    formatted_total: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportOutput {
    period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<NaiveDate>,
    summary: SalesSummary,
    formatted_grand_total: String,
    formatted_outstanding: String,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Prices a bill and prints the breakdown as JSON.
pub fn totals(config: &AppConfig, args: &TotalsArgs) -> anyhow::Result<String> {
    let (items, supply) = match read_json::<TotalsInput>(&args.file)? {
        TotalsInput::Items(items) => (items, None),
        TotalsInput::Bill { items, supply } => (items, supply),
    };
    let mode = config.billing.rounding;

    let totals = compute_order_totals_with(&items, mode);
    let formatter = CurrencyFormatter::from_config(&config.billing);
    let output = TotalsOutput {
        lines: items.iter().map(|item| item.breakdown(mode)).collect(),
        gst_split: split_gst(totals.total_gst, supply.unwrap_or(SupplyType::IntraState)),
        gst_by_rate: summarize_by_rate(&items, mode),
        formatted_total: formatter.format_money(totals.total, true, true),
        totals,
    };
    tracing::info!(lines = items.len(), total = %totals.total, "bill priced");
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Filters orders by period and prints their summary as JSON.
pub fn report(config: &AppConfig, args: &ReportArgs) -> anyhow::Result<String> {
    let orders: Vec<Order> = read_json(&args.file)?;
    let filter = PeriodFilter::new(config.reporting.tz()?);
    let now = match &args.as_of {
        Some(text) => filter.parse_record_date(text)?,
        None => Utc::now(),
    };
    let field = DateField::from(args.by);

    let (label, kept, window) = match (args.start, args.end) {
        (Some(start), Some(end)) => {
            let period = ReportPeriod::Custom(Some(DateWindow::new(start, end)?));
            let kept = filter.filter(&orders, &period, field, now);
            (period.tag().to_string(), kept, period.window(filter.local_date(now)))
        }
        _ => {
            let window = args
                .period
                .parse::<ReportPeriod>()
                .ok()
                .and_then(|period| period.window(filter.local_date(now)));
            let kept = filter.filter_by_tag(&orders, &args.period, field, now);
            (args.period.clone(), kept, window)
        }
    };

    let summary = SalesSummary::from_orders(kept)?;
    let formatter = CurrencyFormatter::from_config(&config.billing);
    let output = ReportOutput {
        period: label,
        start: window.map(|w| w.start()),
        end: window.map(|w| w.end()),
        formatted_grand_total: formatter.format_money(summary.grand_total, true, true),
        formatted_outstanding: formatter.format_money(summary.outstanding, true, true),
        summary,
    };
    tracing::info!(orders = orders.len(), kept = summary.order_count, "report built");
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Formats a single amount.
pub fn format(config: &AppConfig, args: &FormatArgs) -> String {
    CurrencyFormatter::from_config(&config.billing).format_f64(args.amount, !args.no_symbol, !args.no_fixed)
}
