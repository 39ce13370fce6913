//! Core library for tallying SKU quantities from shipping labels.
//!
//! This crate provides:
//! - PDF page text extraction
//! - Recognition of `<sku>;*<quantity>;` label lines
//! - Per-document deduplication and batch totals
//! - Spreadsheet export of the summary

pub mod aggregate;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod pdf;

pub use aggregate::{aggregate, Aggregator, DocumentTally};
pub use error::{ExportError, PdfError, Result, TallyError};
pub use export::{default_output_path, export_summary, SummaryExporter, XlsxExporter};
pub use models::{
    AggregationReport, BatchTotals, DocumentOutcome, DocumentStatus, DocumentTotals, SkuLine,
    SkuTotals, SummaryRow, TallyConfig,
};
pub use parser::{parse_line, LineParser};
pub use pdf::{PdfExtractor, PdfTextExtractor, TextExtractor};
