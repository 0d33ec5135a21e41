//! Staff permissions.
//!
//! Authorisation state is an explicit [`AccessContext`] handed to the
//! operations that need it. Nothing here reads session storage or globals;
//! the caller builds the context from whatever the login service returned.

use std::collections::BTreeSet;

use agrobill_shared::AppError;
use agrobill_shared::types::{ShopId, StaffId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single capability a staff member may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// See sales orders.
    #[serde(rename = "orders:view")]
    ViewOrders,
    /// Bill customers.
    #[serde(rename = "orders:create")]
    CreateOrders,
    /// See purchase orders.
    #[serde(rename = "purchase_orders:view")]
    ViewPurchaseOrders,
    /// Raise purchase orders against suppliers.
    #[serde(rename = "purchase_orders:create")]
    CreatePurchaseOrders,
    /// Record payments and refunds.
    #[serde(rename = "payments:record")]
    RecordPayments,
    /// Edit the product catalog and prices.
    #[serde(rename = "products:manage")]
    ManageProducts,
    /// Adjust stock levels.
    #[serde(rename = "stock:manage")]
    ManageStock,
    /// Open the reports dashboard.
    #[serde(rename = "reports:view")]
    ViewReports,
    /// Add and remove staff.
    #[serde(rename = "staff:manage")]
    ManageStaff,
}

impl Permission {
    /// Every permission.
    pub const ALL: [Self; 9] = [
        Self::ViewOrders,
        Self::CreateOrders,
        Self::ViewPurchaseOrders,
        Self::CreatePurchaseOrders,
        Self::RecordPayments,
        Self::ManageProducts,
        Self::ManageStock,
        Self::ViewReports,
        Self::ManageStaff,
    ];

    /// Stored tag for this permission.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewOrders => "orders:view",
            Self::CreateOrders => "orders:create",
            Self::ViewPurchaseOrders => "purchase_orders:view",
            Self::CreatePurchaseOrders => "purchase_orders:create",
            Self::RecordPayments => "payments:record",
            Self::ManageProducts => "products:manage",
            Self::ManageStock => "stock:manage",
            Self::ViewReports => "reports:view",
            Self::ManageStaff => "staff:manage",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s.trim())
            .ok_or_else(|| AccessError::UnknownPermission(s.to_string()))
    }
}

/// Staff roles within a shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Shop owner, holds every permission.
    Owner,
    /// Runs the shop day to day.
    Manager,
    /// Bills customers and takes payments.
    Cashier,
    /// Receives goods and keeps stock.
    Storekeeper,
}

impl StaffRole {
    /// Permissions the role carries when no explicit list is stored.
    #[must_use]
    pub fn default_permissions(self) -> BTreeSet<Permission> {
        use Permission::{
            CreateOrders, CreatePurchaseOrders, ManageProducts, ManageStock, RecordPayments,
            ViewOrders, ViewPurchaseOrders, ViewReports,
        };

        match self {
            Self::Owner => Permission::ALL.into_iter().collect(),
            Self::Manager => [
                ViewOrders,
                CreateOrders,
                ViewPurchaseOrders,
                CreatePurchaseOrders,
                RecordPayments,
                ManageProducts,
                ManageStock,
                ViewReports,
            ]
            .into_iter()
            .collect(),
            Self::Cashier => [ViewOrders, CreateOrders, RecordPayments].into_iter().collect(),
            Self::Storekeeper => [ViewPurchaseOrders, CreatePurchaseOrders, ManageStock]
                .into_iter()
                .collect(),
        }
    }
}

/// Authorisation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The staff member lacks a permission.
    #[error("Missing permission: {0}")]
    MissingPermission(Permission),

    /// The staff member belongs to a different shop.
    #[error("Staff of shop {actual} cannot act on shop {expected}")]
    WrongShop {
        /// Shop that owns the record.
        expected: ShopId,
        /// Shop of the staff member.
        actual: ShopId,
    },

    /// A stored or submitted permission tag is not recognised.
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),
}

impl AccessError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPermission(_) => "MISSING_PERMISSION",
            Self::WrongShop { .. } => "WRONG_SHOP",
            Self::UnknownPermission(_) => "UNKNOWN_PERMISSION",
        }
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::UnknownPermission(_) => Self::InvalidInput(err.to_string()),
            AccessError::MissingPermission(_) | AccessError::WrongShop { .. } => {
                Self::Forbidden(err.to_string())
            }
        }
    }
}

/// Who is acting, for which shop, with which permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessContext {
    /// Acting staff member.
    pub staff_id: StaffId,
    /// Shop (tenant) the staff member works for.
    pub shop_id: ShopId,
    /// Role of the staff member.
    pub role: StaffRole,
    permissions: BTreeSet<Permission>,
}

impl AccessContext {
    /// Builds a context carrying the role's default permissions.
    #[must_use]
    pub fn for_role(staff_id: StaffId, shop_id: ShopId, role: StaffRole) -> Self {
        Self {
            staff_id,
            shop_id,
            role,
            permissions: role.default_permissions(),
        }
    }

    /// Builds a context from stored permission tags.
    ///
    /// Unknown tags are skipped with a warning. Owners always hold every
    /// permission regardless of the stored list.
    #[must_use]
    pub fn from_tags<I, S>(staff_id: StaffId, shop_id: ShopId, role: StaffRole, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if role == StaffRole::Owner {
            return Self::for_role(staff_id, shop_id, role);
        }

        let permissions = tags
            .into_iter()
            .filter_map(|tag| match tag.as_ref().parse::<Permission>() {
                Ok(permission) => Some(permission),
                Err(_) => {
                    tracing::warn!(%staff_id, tag = tag.as_ref(), "ignoring unknown permission tag");
                    None
                }
            })
            .collect();

        Self {
            staff_id,
            shop_id,
            role,
            permissions,
        }
    }

    /// Returns true if the context holds `permission`.
    #[must_use]
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Permissions held, in a stable order.
    pub fn permissions(&self) -> impl Iterator<Item = Permission> + '_ {
        self.permissions.iter().copied()
    }

    /// Requires `permission`.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::MissingPermission` if it is not held.
    pub fn ensure(&self, permission: Permission) -> Result<(), AccessError> {
        if self.has(permission) {
            Ok(())
        } else {
            Err(AccessError::MissingPermission(permission))
        }
    }

    /// Requires the record's shop to be the staff member's shop.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::WrongShop` otherwise.
    pub fn ensure_shop(&self, shop_id: ShopId) -> Result<(), AccessError> {
        if self.shop_id == shop_id {
            Ok(())
        } else {
            Err(AccessError::WrongShop {
                expected: shop_id,
                actual: self.shop_id,
            })
        }
    }
}
