use std::collections::BTreeMap;

use crate::{Item, ItemId};

/// Highest download count observed locally per item.
///
/// Merging only ever takes the maximum, so applying the same entries twice or
/// in any order yields the same result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadLedger {
    entries: BTreeMap<ItemId, u64>,
}

impl DownloadLedger {
    pub fn from_entries(entries: BTreeMap<ItemId, u64>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &BTreeMap<ItemId, u64> {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<u64> {
        self.entries.get(id).copied()
    }

    /// Raises the entry for `id` to `value`. Returns whether the entry changed.
    pub fn record(&mut self, id: &str, value: u64) -> bool {
        match self.entries.get_mut(id) {
            Some(current) if *current >= value => false,
            Some(current) => {
                *current = value;
                true
            }
            None => {
                self.entries.insert(id.to_string(), value);
                true
            }
        }
    }

    /// Folds `other` into this ledger entry by entry.
    pub fn absorb(&mut self, other: &BTreeMap<ItemId, u64>) -> bool {
        let mut changed = false;
        for (id, value) in other {
            changed |= self.record(id, *value);
        }
        changed
    }

    /// Lifts each item's counter to at least its ledger value.
    pub fn apply(&self, items: &mut [Item]) {
        for item in items {
            if let Some(value) = self.get(&item.id) {
                item.downloads = item.downloads.max(value);
            }
        }
    }
}
