//! Stock on hand per product variant.
//!
//! Finalized orders move stock: sales take it out, purchases bring it in.
//! Lines without a variant id are services or loose items and move nothing.

pub mod error;
pub mod stock;

pub use error::InventoryError;
pub use stock::{StockBook, StockLevel, StockMovement};
