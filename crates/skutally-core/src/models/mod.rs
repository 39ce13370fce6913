//! Data models for label tallying.

pub mod config;
pub mod report;
pub mod sku;
pub mod totals;

pub use config::TallyConfig;
pub use report::{AggregationReport, DocumentOutcome, DocumentStatus};
pub use sku::{SkuLine, SummaryRow};
pub use totals::{BatchTotals, DocumentTotals, SkuTotals};
