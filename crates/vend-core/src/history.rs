//! # Purchase History
//!
//! Running count of successful purchases per item.
//!
//! Entries are kept in the order each item was first logged, so a stable
//! sort by count leaves tied items in first-logged order:
//!
//! ```text
//! log: chocolate, soda, chocolate, crisps, soda
//!
//! entries (first-logged order)   top_items(2)
//! ────────────────────────────   ─────────────
//! chocolate  2                   chocolate
//! soda       2                   soda        (tie, logged before crisps)
//! crisps     1
//! ```

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, Serializer};

/// One item's purchase tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub item: String,
    pub count: u64,
    pub last_purchased_at: DateTime<Utc>,
}

/// Purchase counts, never decremented.
///
/// Serializes as `{ "item": count, ... }` in first-logged order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseHistory {
    entries: Vec<HistoryEntry>,
}

impl PurchaseHistory {
    pub fn new() -> Self {
        PurchaseHistory::default()
    }

    /// Adds one purchase of `item`, starting its count at 1 if unseen.
    /// Returns the new count.
    pub fn record(&mut self, item: &str) -> u64 {
        let now = Utc::now();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item == item) {
            entry.count += 1;
            entry.last_purchased_at = now;
            return entry.count;
        }

        self.entries.push(HistoryEntry {
            item: item.to_string(),
            count: 1,
            last_purchased_at: now,
        });
        1
    }

    /// Purchase count for `item`, zero if never bought.
    pub fn count(&self, item: &str) -> u64 {
        self.entries
            .iter()
            .find(|e| e.item == item)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    pub fn get(&self, item: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.item == item)
    }

    /// Up to `n` item names, highest count first, ties in first-logged order.
    pub fn top(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<&HistoryEntry> = self.entries.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.into_iter().take(n).map(|e| e.item.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// `(item, count)` pairs in first-logged order.
    pub fn counts(&self) -> Vec<(String, u64)> {
        self.entries
            .iter()
            .map(|e| (e.item.clone(), e.count))
            .collect()
    }
}

impl Serialize for PurchaseHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|e| (&e.item, e.count)))
    }
}
