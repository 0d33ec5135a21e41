//! Line-item pricing.
//!
//! For a line with unit price `p`, quantity `q`, and GST rate `r`:
//!
//! - `gst_amount = round2(p × q × r / 100)`
//! - `line_total = round2(p × q) + gst_amount`
//!
//! Quantity is either given directly or derived as `unit × carton`, with both
//! factors defaulting to 1. Negative inputs and rates above 100 are rejected
//! when the line is built, so every [`LineItem`] prices to non-negative money.

use agrobill_shared::types::{Money, RoundingMode, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BillingError;

/// Largest taxable amount (in rupees) a single line may carry.
const MAX_LINE_AMOUNT: i64 = 1_000_000_000_000_000;

/// How many units a line bills for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// An explicit count of units.
    Count(i64),
    /// Units per carton times number of cartons.
    Packed {
        /// Units per carton.
        unit: i64,
        /// Number of cartons.
        carton: i64,
    },
}

impl Default for Quantity {
    fn default() -> Self {
        Self::Packed { unit: 1, carton: 1 }
    }
}

impl Quantity {
    /// Builds a quantity from optional unit and carton factors (default 1 each).
    #[must_use]
    pub fn packed(unit: Option<i64>, carton: Option<i64>) -> Self {
        Self::Packed {
            unit: unit.unwrap_or(1),
            carton: carton.unwrap_or(1),
        }
    }

    /// Resolves to a unit count.
    ///
    /// # Errors
    ///
    /// Returns `NegativeQuantity` for negative factors and `QuantityOverflow`
    /// when `unit × carton` does not fit.
    pub fn resolve(self) -> Result<u64, BillingError> {
        match self {
            Self::Count(count) => non_negative(count),
            Self::Packed { unit, carton } => {
                let unit_count = non_negative(unit)?;
                let carton_count = non_negative(carton)?;
                unit_count
                    .checked_mul(carton_count)
                    .ok_or(BillingError::QuantityOverflow { unit, carton })
            }
        }
    }
}

fn non_negative(value: i64) -> Result<u64, BillingError> {
    if value < 0 {
        Err(BillingError::NegativeQuantity(value))
    } else {
        Ok(value.unsigned_abs())
    }
}

/// Wire shape of a line as the shop front sends it.
///
/// `quantity` wins when present; otherwise `unit × carton` is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    /// Variant being sold or purchased, if tracked in stock.
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    /// Free-text description printed on the bill.
    #[serde(default)]
    pub description: Option<String>,
    /// Price of one unit before tax.
    pub unit_price: Decimal,
    /// Explicit unit count.
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Units per carton.
    #[serde(default)]
    pub unit: Option<i64>,
    /// Number of cartons.
    #[serde(default)]
    pub carton: Option<i64>,
    /// GST rate as a percentage.
    #[serde(default)]
    pub gst_rate: Decimal,
}

impl LineItemInput {
    /// Returns the quantity this input describes.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        match self.quantity {
            Some(count) => Quantity::Count(count),
            None => Quantity::packed(self.unit, self.carton),
        }
    }
}

/// A validated bill line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LineItemInput")]
pub struct LineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    variant_id: Option<VariantId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    unit_price: Decimal,
    quantity: u64,
    gst_rate: Decimal,
}

impl LineItem {
    /// Builds a validated line.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput`-family error for negative price or quantity,
    /// a GST rate outside `[0, 100]`, or an absurdly large line amount.
    pub fn new(
        unit_price: Decimal,
        quantity: Quantity,
        gst_rate: Decimal,
    ) -> Result<Self, BillingError> {
        if unit_price < Decimal::ZERO {
            return Err(BillingError::NegativeUnitPrice(unit_price));
        }
        if gst_rate < Decimal::ZERO || gst_rate > Decimal::ONE_HUNDRED {
            return Err(BillingError::GstRateOutOfRange(gst_rate));
        }
        let quantity = quantity.resolve()?;

        let taxable = unit_price
            .checked_mul(Decimal::from(quantity))
            .filter(|amount| *amount <= Decimal::from(MAX_LINE_AMOUNT))
            .ok_or(BillingError::AmountTooLarge(unit_price))?;
        tracing::trace!(%taxable, quantity, %gst_rate, "line item validated");

        Ok(Self {
            variant_id: None,
            description: None,
            unit_price,
            quantity,
            gst_rate,
        })
    }

    /// Attaches the stock variant this line moves.
    #[must_use]
    pub fn with_variant(mut self, variant_id: VariantId) -> Self {
        self.variant_id = Some(variant_id);
        self
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Variant this line moves, if any.
    #[must_use]
    pub const fn variant_id(&self) -> Option<VariantId> {
        self.variant_id
    }

    /// Description printed on the bill.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Price of one unit before tax.
    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Resolved unit count.
    #[must_use]
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    /// GST rate as a percentage.
    #[must_use]
    pub const fn gst_rate(&self) -> Decimal {
        self.gst_rate
    }

    /// Returns a copy billing a different quantity.
    ///
    /// # Errors
    ///
    /// Same as [`LineItem::new`].
    pub fn with_quantity(&self, quantity: Quantity) -> Result<Self, BillingError> {
        let mut line = Self::new(self.unit_price, quantity, self.gst_rate)?;
        line.variant_id = self.variant_id;
        line.description.clone_from(&self.description);
        Ok(line)
    }

    /// Unrounded `unit_price × quantity`.
    #[must_use]
    pub fn taxable_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Prices the line.
    #[must_use]
    pub fn breakdown(&self, mode: RoundingMode) -> LineBreakdown {
        let taxable = self.taxable_amount();
        let gst = taxable * self.gst_rate / Decimal::ONE_HUNDRED;

        let taxable_amount = to_money(taxable, mode);
        let gst_amount = to_money(gst, mode);

        LineBreakdown {
            quantity: self.quantity,
            taxable_amount,
            gst_amount,
            line_total: taxable_amount + gst_amount,
        }
    }
}

impl TryFrom<LineItemInput> for LineItem {
    type Error = BillingError;

    fn try_from(input: LineItemInput) -> Result<Self, Self::Error> {
        let mut line = Self::new(input.unit_price, input.quantity(), input.gst_rate)?;
        line.variant_id = input.variant_id;
        line.description = input.description;
        Ok(line)
    }
}

/// Computed amounts for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBreakdown {
    /// Resolved unit count.
    pub quantity: u64,
    /// `round2(unit_price × quantity)`.
    pub taxable_amount: Money,
    /// `round2(unit_price × quantity × gst_rate / 100)`.
    pub gst_amount: Money,
    /// `taxable_amount + gst_amount`.
    pub line_total: Money,
}

/// Prices a single line with the default (half-up) rounding.
///
/// # Errors
///
/// Returns an `InvalidInput`-family [`BillingError`] for negative inputs or a
/// GST rate outside `[0, 100]`.
pub fn compute_line_item(
    unit_price: Decimal,
    quantity: Quantity,
    gst_rate: Decimal,
) -> Result<LineBreakdown, BillingError> {
    compute_line_item_with(unit_price, quantity, gst_rate, RoundingMode::default())
}

/// Prices a single line with an explicit rounding policy.
///
/// # Errors
///
/// See [`compute_line_item`].
pub fn compute_line_item_with(
    unit_price: Decimal,
    quantity: Quantity,
    gst_rate: Decimal,
    mode: RoundingMode,
) -> Result<LineBreakdown, BillingError> {
    Ok(LineItem::new(unit_price, quantity, gst_rate)?.breakdown(mode))
}

// Inputs are validated non-negative, so the fallback is unreachable.
pub(crate) fn to_money(value: Decimal, mode: RoundingMode) -> Money {
    Money::with_rounding(value, mode).unwrap_or_default()
}
