use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use stockpile_inventory::Inventory;

/// Store path used when the caller does not pick one.
pub const DEFAULT_STORE_PATH: &str = "inventory.json";

/// Storage-level error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("failed to access inventory file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a valid item -> quantity JSON object.
    #[error("malformed inventory JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage seam for the stock mapping.
pub trait InventoryStore {
    /// Read the whole persisted mapping.
    ///
    /// Replacement is wholesale: the caller assigns the returned value over
    /// its current inventory.
    fn load(&self) -> Result<Inventory, StoreError>;

    /// Overwrite the persisted mapping with `inventory`.
    fn save(&self, inventory: &Inventory) -> Result<(), StoreError>;
}

/// Whole-file JSON store.
///
/// The persisted format is a UTF-8 JSON object mapping item name to integer
/// quantity, no versioning, no nesting. The file is opened, fully read or
/// written, and released before the operation returns, on all paths.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn parse_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Parse {
            path: self.path.clone(),
            source,
        }
    }
}

impl InventoryStore for JsonFileStore {
    fn load(&self) -> Result<Inventory, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let inventory = serde_json::from_str(&raw).map_err(|e| self.parse_error(e))?;
        tracing::debug!(path = %self.path.display(), "inventory loaded");
        Ok(inventory)
    }

    fn save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let raw = serde_json::to_string(inventory).map_err(|e| self.parse_error(e))?;
        fs::write(&self.path, raw).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), items = inventory.len(), "inventory saved");
        Ok(())
    }
}
