//! PDF text extraction.

mod extractor;

pub use extractor::{PdfExtractor, PdfTextExtractor};

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Source of page texts for a label document.
pub trait TextExtractor {
    /// Extract the text of every page of the document at `path`, in page order.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

impl<T: TextExtractor + ?Sized> TextExtractor for &T {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        (**self).extract_pages(path)
    }
}
