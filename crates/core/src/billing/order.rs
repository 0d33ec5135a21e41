//! Sales orders and purchase orders.
//!
//! An order is built through an [`OrderDraft`], which keeps its totals in step
//! with the lines on every change. [`OrderDraft::finalize`] checks the staff
//! context and freezes the result into an [`Order`].

use agrobill_shared::types::{CustomerId, Money, OrderId, RoundingMode, ShopId, StaffId, SupplierId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::BillingError;
use super::line_item::{LineItem, Quantity};
use super::totals::{OrderTotals, compute_order_totals_with};
use crate::access::{AccessContext, Permission};
use crate::payment::{PaymentStatus, PaymentType};
use crate::reports::{DateField, Timestamped};

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// Goods sold to a customer.
    Sale,
    /// Goods bought from a supplier.
    Purchase,
}

impl OrderKind {
    /// Permission needed to create an order of this kind.
    #[must_use]
    pub const fn create_permission(self) -> Permission {
        match self {
            Self::Sale => Permission::CreateOrders,
            Self::Purchase => Permission::CreatePurchaseOrders,
        }
    }
}

/// The other side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Party {
    /// A customer buying from the shop.
    Customer(CustomerId),
    /// A supplier the shop buys from.
    Supplier(SupplierId),
}

impl Party {
    /// Order kind implied by the party.
    #[must_use]
    pub const fn kind(self) -> OrderKind {
        match self {
            Self::Customer(_) => OrderKind::Sale,
            Self::Supplier(_) => OrderKind::Purchase,
        }
    }
}

/// An order being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    shop_id: ShopId,
    party: Party,
    items: Vec<LineItem>,
    rounding: RoundingMode,
    totals: OrderTotals,
}

impl OrderDraft {
    /// Starts an empty draft.
    #[must_use]
    pub const fn new(shop_id: ShopId, party: Party) -> Self {
        Self {
            shop_id,
            party,
            items: Vec::new(),
            rounding: RoundingMode::HalfUp,
            totals: OrderTotals::ZERO,
        }
    }

    /// Uses `rounding` for every total computed from now on.
    #[must_use]
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self.recompute();
        self
    }

    /// Shop the order is for.
    #[must_use]
    pub const fn shop_id(&self) -> ShopId {
        self.shop_id
    }

    /// Customer or supplier.
    #[must_use]
    pub const fn party(&self) -> Party {
        self.party
    }

    /// Lines in entry order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Totals of the current lines.
    #[must_use]
    pub const fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    /// Appends a line and returns the new totals.
    pub fn add_item(&mut self, item: LineItem) -> &OrderTotals {
        self.items.push(item);
        self.recompute();
        &self.totals
    }

    /// Removes the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::LineNotFound` if there is no such line.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, BillingError> {
        if index >= self.items.len() {
            return Err(BillingError::LineNotFound(index));
        }
        let removed = self.items.remove(index);
        self.recompute();
        Ok(removed)
    }

    /// Changes the quantity of the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::LineNotFound` for a bad index, or the line
    /// validation error for a bad quantity. The draft is unchanged on error.
    pub fn set_quantity(&mut self, index: usize, quantity: Quantity) -> Result<&OrderTotals, BillingError> {
        let line = self
            .items
            .get(index)
            .ok_or(BillingError::LineNotFound(index))?
            .with_quantity(quantity)?;
        self.items[index] = line;
        self.recompute();
        Ok(&self.totals)
    }

    /// Freezes the draft into an order.
    ///
    /// # Errors
    ///
    /// - `BillingError::Access` if the staff member works for another shop or
    ///   may not create this kind of order
    /// - `BillingError::EmptyOrder` if there are no lines
    pub fn finalize(
        self,
        ctx: &AccessContext,
        id: OrderId,
        captured_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Order, BillingError> {
        ctx.ensure_shop(self.shop_id)?;
        ctx.ensure(self.party.kind().create_permission())?;
        if self.items.is_empty() {
            return Err(BillingError::EmptyOrder);
        }

        let status = PaymentStatus::from_amounts(self.totals.total, Money::ZERO);
        tracing::debug!(
            order_id = %id,
            shop_id = %self.shop_id,
            kind = ?self.party.kind(),
            lines = self.items.len(),
            total = %self.totals.total,
            "order finalized"
        );

        Ok(Order {
            id,
            shop_id: self.shop_id,
            party: self.party,
            items: self.items,
            totals: self.totals,
            payment_status: status,
            amount_paid: Money::ZERO,
            captured_at,
            created_at: now,
            created_by: ctx.staff_id,
        })
    }

    fn recompute(&mut self) {
        self.totals = compute_order_totals_with(&self.items, self.rounding);
    }
}

/// A finalized sale or purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    shop_id: ShopId,
    party: Party,
    items: Vec<LineItem>,
    totals: OrderTotals,
    #[serde(default)]
    payment_status: PaymentStatus,
    #[serde(default)]
    amount_paid: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    captured_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    created_by: StaffId,
}

impl Order {
    /// Order id.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Shop the order belongs to.
    #[must_use]
    pub const fn shop_id(&self) -> ShopId {
        self.shop_id
    }

    /// Customer or supplier.
    #[must_use]
    pub const fn party(&self) -> Party {
        self.party
    }

    /// Sale or purchase.
    #[must_use]
    pub const fn kind(&self) -> OrderKind {
        self.party.kind()
    }

    /// Billed lines.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Totals frozen at finalization.
    #[must_use]
    pub const fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    /// Current payment status.
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Payment type printed on the bill.
    #[must_use]
    pub const fn payment_type(&self) -> PaymentType {
        self.payment_status.payment_type()
    }

    /// Total received so far.
    #[must_use]
    pub const fn amount_paid(&self) -> Money {
        self.amount_paid
    }

    /// When the sale or purchase took place, if back-dated.
    #[must_use]
    pub const fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.captured_at
    }

    /// When the order was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Staff member who created the order.
    #[must_use]
    pub const fn created_by(&self) -> StaffId {
        self.created_by
    }

    /// Amount still owed, never negative.
    #[must_use]
    pub fn balance_due(&self) -> Money {
        self.totals.total.saturating_sub(self.amount_paid)
    }

    /// Records a payment and returns the new status.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Access` unless the staff member works for this
    /// shop and may record payments, `BillingError::OrderRefunded` once the
    /// order has been refunded, and `BillingError::AmountOverflow` if the
    /// running total no longer fits.
    pub fn record_payment(&mut self, ctx: &AccessContext, amount: Money) -> Result<PaymentStatus, BillingError> {
        self.authorize_payment(ctx)?;
        if self.payment_status == PaymentStatus::Refunded {
            tracing::warn!(order_id = %self.id, %amount, "payment on refunded order rejected");
            return Err(BillingError::OrderRefunded(self.id));
        }
        self.amount_paid = self
            .amount_paid
            .checked_add(amount)
            .ok_or(BillingError::AmountOverflow(self.amount_paid, amount))?;
        self.payment_status = PaymentStatus::from_amounts(self.totals.total, self.amount_paid);
        tracing::debug!(
            order_id = %self.id,
            %amount,
            paid = %self.amount_paid,
            status = %self.payment_status,
            "payment recorded"
        );
        Ok(self.payment_status)
    }

    /// Marks the order refunded. The amount paid is kept for the record.
    ///
    /// # Errors
    ///
    /// Same as [`Order::record_payment`].
    pub fn refund(&mut self, ctx: &AccessContext) -> Result<(), BillingError> {
        self.authorize_payment(ctx)?;
        self.payment_status = PaymentStatus::Refunded;
        tracing::info!(order_id = %self.id, paid = %self.amount_paid, "order refunded");
        Ok(())
    }

    fn authorize_payment(&self, ctx: &AccessContext) -> Result<(), BillingError> {
        ctx.ensure_shop(self.shop_id)?;
        ctx.ensure(Permission::RecordPayments)?;
        Ok(())
    }
}

impl Timestamped for Order {
    fn timestamp(&self, field: DateField) -> Option<DateTime<Utc>> {
        match field {
            DateField::CaptureDate => self.captured_at,
            DateField::CreatedAt => Some(self.created_at),
        }
    }
}
