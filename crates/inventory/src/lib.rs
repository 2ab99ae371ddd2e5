//! Stock domain: the in-memory inventory mapping.
//!
//! This crate contains the mutation and query rules for stock levels,
//! implemented purely as deterministic domain logic (no file IO, no storage;
//! persistence lives in `stockpile-infra`).

pub mod log;
pub mod store;

pub use log::ActivityLog;
pub use store::{
    DEFAULT_LOW_STOCK_THRESHOLD, Inventory, InventoryError, InventoryResult, RemoveOutcome,
};
