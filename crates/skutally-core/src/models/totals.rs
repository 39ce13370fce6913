//! Insertion-ordered quantity totals keyed by SKU code.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::sku::SummaryRow;

/// Quantities keyed by SKU code, iterated in first-seen order.
///
/// Totals only grow: `add` and `merge` never remove a key or lower a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuTotals {
    counts: IndexMap<String, u64>,
}

/// Totals for a single label document.
pub type DocumentTotals = SkuTotals;

/// Totals across every document of a run.
pub type BatchTotals = SkuTotals;

impl SkuTotals {
    /// Create empty totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` to `sku_code`, starting from zero for unseen codes.
    pub fn add(&mut self, sku_code: &str, quantity: u64) {
        match self.counts.get_mut(sku_code) {
            Some(total) => *total = total.saturating_add(quantity),
            None => {
                self.counts.insert(sku_code.to_string(), quantity);
            }
        }
    }

    /// Fold another set of totals into this one.
    pub fn merge(&mut self, other: &SkuTotals) {
        for (sku_code, quantity) in other.iter() {
            self.add(sku_code, quantity);
        }
    }

    /// Total recorded for `sku_code`, if it was ever seen.
    pub fn get(&self, sku_code: &str) -> Option<u64> {
        self.counts.get(sku_code).copied()
    }

    pub fn contains(&self, sku_code: &str) -> bool {
        self.counts.contains_key(sku_code)
    }

    /// Number of distinct SKU codes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, q| acc.saturating_add(*q))
    }

    /// Iterate `(sku_code, quantity)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Rows for export, in first-seen order.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.iter()
            .map(|(sku_code, quantity)| SummaryRow::new(sku_code, quantity))
            .collect()
    }
}
