//! Shared types, errors, and configuration for AgroBill.
//!
//! This crate provides common types used across all other crates:
//! - Money type with fixed two-decimal precision
//! - Typed IDs for shops, staff, orders, variants, customers, and suppliers
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
