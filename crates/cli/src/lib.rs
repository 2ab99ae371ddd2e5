//! The `stockpile` binary: a fixed demonstration sequence over a
//! JSON-file-backed inventory. No flags, no configuration surface.

use std::path::Path;

use anyhow::Context;

use stockpile_infra::{InventoryStore, JsonFileStore};
use stockpile_inventory::{ActivityLog, Inventory};

/// Run the demonstration sequence against the store at `path`.
///
/// Stocks a few items, removes some, prints the apple count and the
/// low-stock list, round-trips the mapping through the store, and prints
/// the final report.
pub fn run_demo(path: &Path) -> anyhow::Result<()> {
    let store = JsonFileStore::new(path);
    let mut inventory = Inventory::new();
    let mut log = ActivityLog::new();

    inventory.add("apple", 10, Some(&mut log));
    inventory.add("banana", 2, Some(&mut log));
    inventory.add("orange", 5, Some(&mut log));
    inventory.remove("apple", 3);
    inventory.remove("orange", 1);

    for line in log.entries() {
        tracing::debug!("{line}");
    }

    let apples = inventory
        .quantity_of("apple")
        .context("apple went missing mid-demo")?;
    println!("Apple stock: {apples}");
    println!("Low items: {:?}", inventory.low_stock_default());

    store
        .save(&inventory)
        .with_context(|| format!("saving inventory to {}", path.display()))?;
    inventory = store
        .load()
        .with_context(|| format!("reloading inventory from {}", path.display()))?;

    println!("Items Report");
    print!("{}", inventory.report());

    Ok(())
}
