//! Error types for the skutally-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the skutally library.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Summary export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to getting text out of a label document.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to read the document from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to writing the summary table.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The workbook could not be built.
    #[error("failed to build workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The output file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary file could not be moved over the target.
    #[error("failed to persist {path}: {reason}")]
    Persist { path: PathBuf, reason: String },
}

/// Result type for the skutally library.
pub type Result<T> = std::result::Result<T, TallyError>;
