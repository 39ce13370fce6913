//! PDF text extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{Result, TextExtractor};
use crate::error::PdfError;

/// Page text extractor for a single loaded PDF.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf_extract needs the decrypted bytes for the fallback path
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    /// Get the number of pages in the loaded PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Extract text from a specific page (1-indexed).
    pub fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.loaded()?;
        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(format!("page {}: {}", page, e)))
    }

    /// Extract text from the entire PDF as one string.
    pub fn extract_text(&self) -> Result<String> {
        guard_extraction(|| pdf_extract::extract_text_from_mem(&self.raw_data))
    }

    /// Extract text page by page.
    ///
    /// When lopdf cannot read a page, or reads nothing from any page, the
    /// whole document is handed to pdf_extract and returned as one page.
    pub fn extract_pages(&self) -> Result<Vec<String>> {
        let doc = self.loaded()?;
        debug!("Extracting text from {} pages", self.page_count());

        let mut pages = Vec::new();
        let mut per_page_error = None;
        for page_num in doc.get_pages().keys() {
            match self.extract_page_text(*page_num) {
                Ok(text) => {
                    trace!("Extracted text from page {}:\n{}", page_num, text);
                    pages.push(text);
                }
                Err(e) => {
                    per_page_error = Some(e);
                    break;
                }
            }
        }

        if let Some(e) = per_page_error {
            warn!("Per-page extraction failed ({}), falling back to pdf-extract", e);
            return self.extract_text().map(|text| vec![text]);
        }

        if pages.iter().all(|p| p.trim().is_empty()) {
            debug!("No text found per page, trying pdf-extract");
            if let Ok(text) = self.extract_text() {
                if !text.trim().is_empty() {
                    trace!("Extracted document text:\n{}", text);
                    return Ok(vec![text]);
                }
            }
        }

        Ok(pages)
    }

    fn loaded(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a pdf-extract call, turning a panic into a `TextExtraction` error.
///
/// pdf-extract (and cff-parser underneath it) can panic on malformed fonts
/// or glyphs; one bad label must not end the run.
fn guard_extraction<F, E>(extract: F) -> Result<String>
where
    F: FnOnce() -> std::result::Result<String, E>,
    E: std::fmt::Display,
{
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(extract)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(PdfError::TextExtraction(e.to_string())),
        Err(_panic) => {
            warn!("pdf-extract panicked, likely on a malformed font");
            Err(PdfError::TextExtraction(
                "pdf-extract panicked, likely on a malformed font".to_string(),
            ))
        }
    }
}

/// Reads label PDFs from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let data = std::fs::read(path).map_err(|source| PdfError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;
        extractor.extract_pages()
    }
}
