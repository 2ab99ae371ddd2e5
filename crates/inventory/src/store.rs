use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::log::ActivityLog;

/// Threshold below which an item counts as low stock, unless the caller
/// picks another one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Result type used across the stock domain.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Domain-level error.
///
/// Keep this focused on deterministic query failures; file/storage concerns
/// belong to `stockpile-infra`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A queried item has no entry in the inventory.
    #[error("item not found: {0}")]
    NotFound(String),
}

impl InventoryError {
    pub fn not_found(item: impl Into<String>) -> Self {
        Self::NotFound(item.into())
    }
}

/// What a `remove` did.
///
/// Removing from a missing item is an expected condition, not an error, so
/// it is reported here instead of through `InventoryError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Quantity was decremented; the entry is still present.
    Reduced { remaining: i64 },
    /// Quantity reached zero or below; the entry was dropped.
    Depleted,
    /// No such item; the inventory was left untouched.
    NotFound,
}

/// Stock mapping: item name -> quantity on hand.
///
/// Entries iterate in lexicographic name order. Every stored quantity is
/// strictly positive: both mutation paths drop an entry whose resulting
/// quantity is zero or below. Serializes as a flat JSON object, which is
/// also the persisted file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: BTreeMap<String, i64>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` of `item`, creating the entry if needed.
    ///
    /// An empty item name is a no-op: neither the mapping nor the log is
    /// touched. Otherwise the mutation is appended to `log` as one
    /// timestamped line; `None` discards it.
    pub fn add(&mut self, item: &str, qty: i64, log: Option<&mut ActivityLog>) {
        if item.is_empty() {
            return;
        }
        self.apply_delta(item, qty);
        if let Some(log) = log {
            log.record(format!("{}: added {qty} of {item}", Utc::now()));
        }
    }

    /// Remove `qty` of `item`.
    ///
    /// A missing item is recovered locally: a warning is emitted, nothing
    /// is mutated, and the caller gets [`RemoveOutcome::NotFound`].
    pub fn remove(&mut self, item: &str, qty: i64) -> RemoveOutcome {
        if !self.items.contains_key(item) {
            tracing::warn!(item, "remove ignored: item not in stock");
            return RemoveOutcome::NotFound;
        }
        match self.apply_delta(item, -qty) {
            Some(remaining) => RemoveOutcome::Reduced { remaining },
            None => RemoveOutcome::Depleted,
        }
    }

    /// Quantity on hand for `item`. No default: a missing item is an error.
    pub fn quantity_of(&self, item: &str) -> InventoryResult<i64> {
        self.items
            .get(item)
            .copied()
            .ok_or_else(|| InventoryError::not_found(item))
    }

    /// Names of items whose quantity is strictly below `threshold`, in
    /// iteration order.
    pub fn low_stock(&self, threshold: i64) -> Vec<String> {
        self.items
            .iter()
            .filter(|&(_, &qty)| qty < threshold)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// [`Inventory::low_stock`] at [`DEFAULT_LOW_STOCK_THRESHOLD`].
    pub fn low_stock_default(&self) -> Vec<String> {
        self.low_stock(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    /// Human-readable listing: one `name -> qty` line per item, in
    /// iteration order.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for (name, qty) in &self.items {
            let _ = writeln!(out, "{name} -> {qty}");
        }
        out
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over `(name, quantity)` pairs in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.items.iter().map(|(name, &qty)| (name.as_str(), qty))
    }

    /// Shift `item` by `delta`, dropping the entry at or below zero.
    ///
    /// Returns the remaining quantity while the entry survives.
    fn apply_delta(&mut self, item: &str, delta: i64) -> Option<i64> {
        let next = self.items.get(item).copied().unwrap_or(0) + delta;
        if next <= 0 {
            self.items.remove(item);
            None
        } else {
            self.items.insert(item.to_string(), next);
            Some(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stocked(entries: &[(&str, i64)]) -> Inventory {
        let mut inv = Inventory::new();
        for &(item, qty) in entries {
            inv.add(item, qty, None);
        }
        inv
    }

    #[test]
    fn add_then_remove_leaves_difference() {
        let mut inv = Inventory::new();
        inv.add("apple", 10, None);

        let outcome = inv.remove("apple", 3);

        assert_eq!(outcome, RemoveOutcome::Reduced { remaining: 7 });
        assert_eq!(inv.quantity_of("apple"), Ok(7));
    }

    #[test]
    fn removing_full_quantity_drops_the_entry() {
        let mut inv = Inventory::new();
        inv.add("orange", 5, None);

        let outcome = inv.remove("orange", 5);

        assert_eq!(outcome, RemoveOutcome::Depleted);
        assert!(!inv.contains("orange"));
        assert_eq!(
            inv.quantity_of("orange"),
            Err(InventoryError::not_found("orange"))
        );
    }

    #[test]
    fn removing_a_missing_item_changes_nothing() {
        let mut inv = stocked(&[("apple", 10)]);
        let before = inv.clone();

        let outcome = inv.remove("nonexistent", 1);

        assert_eq!(outcome, RemoveOutcome::NotFound);
        assert_eq!(inv, before);
    }

    #[test]
    fn empty_item_name_is_a_no_op() {
        let mut inv = Inventory::new();
        let mut log = ActivityLog::new();

        inv.add("", 10, Some(&mut log));

        assert!(inv.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn add_records_one_timestamped_line() {
        let mut inv = Inventory::new();
        let mut log = ActivityLog::new();

        inv.add("apple", 10, Some(&mut log));

        assert_eq!(log.len(), 1);
        assert!(log.entries()[0].ends_with("added 10 of apple"));
    }

    #[test]
    fn add_without_a_log_still_mutates() {
        let mut inv = Inventory::new();
        inv.add("apple", 10, None);
        assert_eq!(inv.quantity_of("apple"), Ok(10));
    }

    #[test]
    fn add_driving_quantity_to_zero_drops_the_entry() {
        let mut inv = stocked(&[("apple", 3)]);

        inv.add("apple", -3, None);

        assert!(!inv.contains("apple"));
    }

    #[test]
    fn low_stock_returns_items_strictly_below_threshold() {
        let inv = stocked(&[("apple", 7), ("banana", 2), ("orange", 4)]);

        assert_eq!(inv.low_stock(5), ["banana", "orange"]);
        assert_eq!(inv.low_stock_default(), ["banana", "orange"]);
        assert!(inv.low_stock(2).is_empty());
    }

    #[test]
    fn report_lists_every_item_in_iteration_order() {
        let inv = stocked(&[("orange", 4), ("apple", 7), ("banana", 2)]);

        assert_eq!(inv.report(), "apple -> 7\nbanana -> 2\norange -> 4\n");
    }

    #[test]
    fn report_of_empty_inventory_is_empty() {
        assert_eq!(Inventory::new().report(), "");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: For any sequence of positive adds to one item, the
        /// stored quantity is the sum of the added quantities.
        #[test]
        fn positive_adds_accumulate(
            qtys in prop::collection::vec(1i64..1_000i64, 1..20)
        ) {
            let mut inv = Inventory::new();
            for qty in &qtys {
                inv.add("widget", *qty, None);
            }

            let expected: i64 = qtys.iter().sum();
            prop_assert_eq!(inv.quantity_of("widget"), Ok(expected));
        }

        /// Property: After any interleaving of adds and removes, every
        /// stored quantity is strictly positive.
        #[test]
        fn stored_quantities_stay_strictly_positive(
            ops in prop::collection::vec(
                (0usize..3, -50i64..50i64, prop::bool::ANY),
                0..40,
            )
        ) {
            const NAMES: [&str; 3] = ["apple", "banana", "orange"];

            let mut inv = Inventory::new();
            for (slot, qty, is_add) in ops {
                let item = NAMES[slot];
                if is_add {
                    inv.add(item, qty, None);
                } else {
                    inv.remove(item, qty);
                }
            }

            for (_, qty) in inv.iter() {
                prop_assert!(qty > 0);
            }
        }
    }
}
