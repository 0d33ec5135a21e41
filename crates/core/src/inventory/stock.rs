//! Stock book.

use std::collections::BTreeMap;

use agrobill_shared::types::{OrderId, VariantId};
use serde::{Deserialize, Serialize};

use super::error::InventoryError;
use crate::billing::{Order, OrderKind};

/// On-hand quantity of one variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    /// Units on hand.
    pub on_hand: i64,
    /// Level at or below which the variant is reported as low.
    pub low_stock_threshold: i64,
}

impl StockLevel {
    /// Returns true if the level is at or below its threshold.
    #[must_use]
    pub const fn is_low(&self) -> bool {
        self.on_hand <= self.low_stock_threshold
    }
}

/// One change of stock caused by an order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    /// Order that caused the movement.
    pub order_id: OrderId,
    /// Variant moved.
    pub variant_id: VariantId,
    /// Signed change: negative for sales, positive for purchases.
    pub delta: i64,
    /// Units on hand afterwards.
    pub on_hand: i64,
}

/// Stock levels for a shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockBook {
    levels: BTreeMap<VariantId, StockLevel>,
}

impl StockBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level of a variant, replacing any previous one.
    pub fn set_level(&mut self, variant_id: VariantId, level: StockLevel) {
        self.levels.insert(variant_id, level);
    }

    /// Level of a variant, if tracked.
    #[must_use]
    pub fn level(&self, variant_id: VariantId) -> Option<&StockLevel> {
        self.levels.get(&variant_id)
    }

    /// Units on hand; untracked variants have none.
    #[must_use]
    pub fn on_hand(&self, variant_id: VariantId) -> i64 {
        self.levels.get(&variant_id).map_or(0, |level| level.on_hand)
    }

    /// Moves stock for every line of `order` that names a variant.
    ///
    /// All lines are checked before anything changes, so on error the book
    /// is left exactly as it was. Purchases of untracked variants start
    /// tracking them with a zero threshold.
    ///
    /// # Errors
    ///
    /// - `InventoryError::InsufficientStock` if a sale would take a variant
    ///   below zero
    /// - `InventoryError::QuantityTooLarge` if a quantity overflows
    pub fn apply_order(&mut self, order: &Order) -> Result<Vec<StockMovement>, InventoryError> {
        let sign: i64 = match order.kind() {
            OrderKind::Sale => -1,
            OrderKind::Purchase => 1,
        };

        // Net change per variant, so repeated lines are checked together.
        let mut deltas: BTreeMap<VariantId, (u64, i64)> = BTreeMap::new();
        for item in order.items() {
            let Some(variant_id) = item.variant_id() else {
                continue;
            };
            let too_large = || InventoryError::QuantityTooLarge {
                variant_id,
                quantity: item.quantity(),
            };
            let quantity = i64::try_from(item.quantity()).map_err(|_| too_large())?;
            let entry = deltas.entry(variant_id).or_insert((0, 0));
            entry.0 = entry.0.checked_add(item.quantity()).ok_or_else(too_large)?;
            entry.1 = entry
                .1
                .checked_add(sign * quantity)
                .ok_or_else(too_large)?;
        }

        let mut updated = Vec::with_capacity(deltas.len());
        for (variant_id, (requested, delta)) in &deltas {
            let current = self.levels.get(variant_id).copied().unwrap_or_default();
            let on_hand = current
                .on_hand
                .checked_add(*delta)
                .ok_or(InventoryError::QuantityTooLarge {
                    variant_id: *variant_id,
                    quantity: *requested,
                })?;
            if on_hand < 0 {
                tracing::warn!(
                    order_id = %order.id(),
                    %variant_id,
                    requested,
                    available = current.on_hand,
                    "sale exceeds stock on hand"
                );
                return Err(InventoryError::InsufficientStock {
                    variant_id: *variant_id,
                    requested: *requested,
                    available: current.on_hand,
                });
            }
            updated.push((*variant_id, StockLevel { on_hand, ..current }, *delta));
        }

        let mut movements = Vec::with_capacity(updated.len());
        for (variant_id, level, delta) in updated {
            self.levels.insert(variant_id, level);
            movements.push(StockMovement {
                order_id: order.id(),
                variant_id,
                delta,
                on_hand: level.on_hand,
            });
        }

        tracing::debug!(order_id = %order.id(), movements = movements.len(), "stock updated");
        Ok(movements)
    }

    /// Variants at or below their threshold, in id order.
    pub fn low_stock(&self) -> impl Iterator<Item = (VariantId, &StockLevel)> + '_ {
        self.levels
            .iter()
            .filter(|(_, level)| level.is_low())
            .map(|(id, level)| (*id, level))
    }
}
