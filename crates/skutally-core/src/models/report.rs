//! Per-run reporting of which documents were counted.

use std::path::PathBuf;

use serde::Serialize;

use super::totals::BatchTotals;

/// What happened to one label document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Text was extracted and the document contributed to the totals.
    Counted {
        /// Number of pages read.
        pages: usize,
        /// Lines that matched the SKU pattern, duplicates included.
        lines_matched: usize,
        /// Distinct SKU codes contributed.
        skus: usize,
    },
    /// The document could not be read; it contributed nothing.
    Failed { reason: String },
}

/// A processed document and its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: DocumentStatus,
}

impl DocumentOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, DocumentStatus::Failed { .. })
    }
}

/// Result of aggregating a folder of label documents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationReport {
    /// Totals across all successfully read documents.
    pub totals: BatchTotals,
    /// Documents in processing order.
    pub documents: Vec<DocumentOutcome>,
}

impl AggregationReport {
    /// Documents that could not be read.
    pub fn failed(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.documents.iter().filter(|d| d.is_failed())
    }

    /// Documents that contributed to the totals.
    pub fn counted(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.documents.iter().filter(|d| !d.is_failed())
    }
}
