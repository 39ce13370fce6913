//! Recognized label items and summary rows.

use serde::{Deserialize, Serialize};

/// A single item recognized on a shipping label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuLine {
    /// Product code; letters, digits and hyphens, compared case-sensitively.
    pub sku_code: String,
    /// Shipped quantity.
    pub quantity: u32,
}

impl SkuLine {
    pub fn new(sku_code: impl Into<String>, quantity: u32) -> Self {
        Self {
            sku_code: sku_code.into(),
            quantity,
        }
    }
}

/// One row of the exported summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub sku_code: String,
    pub total_quantity: u64,
}

impl SummaryRow {
    pub fn new(sku_code: impl Into<String>, total_quantity: u64) -> Self {
        Self {
            sku_code: sku_code.into(),
            total_quantity,
        }
    }
}
