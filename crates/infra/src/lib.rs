//! Persistence for the stock domain.
//!
//! One storage seam ([`InventoryStore`]) and one implementation: a flat
//! JSON file holding the whole mapping.

pub mod file_store;

pub use file_store::{DEFAULT_STORE_PATH, InventoryStore, JsonFileStore, StoreError};
