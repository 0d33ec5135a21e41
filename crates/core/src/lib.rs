//! Core billing logic for AgroBill.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Pricing rules, period filtering, and stock movements live here; callers
//! own persistence and transport.
//!
//! # Modules
//!
//! - `billing` - Line items, order totals, GST split, orders
//! - `payment` - Payment status and the payment type printed on bills
//! - `reports` - Period filtering and sales summaries
//! - `format` - Rupee formatting with Indian digit grouping
//! - `inventory` - Stock on hand per variant
//! - `access` - Staff permissions passed explicitly to operations

pub mod access;
pub mod billing;
pub mod format;
pub mod inventory;
pub mod payment;
pub mod reports;
