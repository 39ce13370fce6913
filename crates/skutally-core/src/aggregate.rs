//! Folder-level aggregation of SKU quantities.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::config::TallyConfig;
use crate::models::report::{AggregationReport, DocumentOutcome, DocumentStatus};
use crate::models::totals::{BatchTotals, DocumentTotals};
use crate::parser::LineParser;
use crate::pdf::TextExtractor;

/// Walks a folder of label documents and totals SKU quantities.
pub struct Aggregator<E> {
    extractor: E,
    parser: LineParser,
    dedupe_per_document: bool,
    document_suffix: String,
}

/// Counts for a single document before merging.
#[derive(Debug, Clone, Default)]
pub struct DocumentTally {
    pub totals: DocumentTotals,
    pub lines_matched: usize,
}

impl<E: TextExtractor> Aggregator<E> {
    /// Create an aggregator with deduplication on and a `.pdf` suffix.
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            parser: LineParser::new(),
            dedupe_per_document: true,
            document_suffix: ".pdf".to_string(),
        }
    }

    /// Create an aggregator from configuration.
    pub fn from_config(extractor: E, config: &TallyConfig) -> Self {
        Self::new(extractor)
            .with_dedupe(config.dedupe_per_document)
            .with_suffix(config.document_suffix.clone())
    }

    /// Count each SKU at most once per document.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe_per_document = dedupe;
        self
    }

    /// Set the file name suffix that selects label documents.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.document_suffix = suffix.into();
        self
    }

    /// List label documents in `folder`, sorted by file name.
    pub fn list_documents(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let mut documents = Vec::new();
        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                debug!("Skipping non UTF-8 file name {:?}", name);
                continue;
            };
            if !name.ends_with(&self.document_suffix) {
                continue;
            }
            if !entry.file_type()?.is_file() && !entry.path().is_file() {
                continue;
            }
            documents.push(entry.path());
        }
        documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(documents)
    }

    /// Count the SKU lines of one document's pages.
    pub fn tally_document<S: AsRef<str>>(&self, pages: &[S]) -> DocumentTally {
        let mut tally = DocumentTally::default();
        let mut counted: HashSet<String> = HashSet::new();

        for page in pages {
            for line in self.parser.parse_text(page.as_ref()) {
                tally.lines_matched += 1;

                if self.dedupe_per_document && !counted.insert(line.sku_code.clone()) {
                    debug!("Skipping repeated SKU {} in document", line.sku_code);
                    continue;
                }
                tally.totals.add(&line.sku_code, u64::from(line.quantity));
            }
        }

        tally
    }

    /// Process every label document in `folder`.
    ///
    /// Documents that cannot be read are reported as failed and contribute
    /// nothing. Only failing to list the folder itself is an error.
    pub fn aggregate(&self, folder: &Path) -> Result<AggregationReport> {
        self.aggregate_with_progress(folder, |_, _| {})
    }

    /// Like [`Aggregator::aggregate`], calling `on_document` after each document.
    pub fn aggregate_with_progress<F>(&self, folder: &Path, mut on_document: F) -> Result<AggregationReport>
    where
        F: FnMut(&DocumentOutcome, usize),
    {
        let documents = self.list_documents(folder)?;
        info!("Found {} label documents in {}", documents.len(), folder.display());

        let mut report = AggregationReport::default();
        let total = documents.len();

        for path in documents {
            info!("Processing label: {}", path.display());

            let status = match self.extractor.extract_pages(&path) {
                Ok(pages) => {
                    let tally = self.tally_document(&pages);
                    debug!("Document subtotal for {}: {:?}", path.display(), tally.totals);
                    report.totals.merge(&tally.totals);
                    DocumentStatus::Counted {
                        pages: pages.len(),
                        lines_matched: tally.lines_matched,
                        skus: tally.totals.len(),
                    }
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    DocumentStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            report.documents.push(DocumentOutcome { path, status });
            if let Some(outcome) = report.documents.last() {
                on_document(outcome, total);
            }
        }

        if report.totals.is_empty() {
            warn!("No SKU data found in {}", folder.display());
        }

        Ok(report)
    }
}

/// Total SKU quantities across the label documents in `folder`.
pub fn aggregate<E: TextExtractor>(
    extractor: E,
    folder: &Path,
    dedupe_per_document: bool,
) -> Result<BatchTotals> {
    Aggregator::new(extractor)
        .with_dedupe(dedupe_per_document)
        .aggregate(folder)
        .map(|report| report.totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Serves page texts from a map keyed by file name; unknown files fail.
    struct FakeExtractor {
        documents: HashMap<String, Vec<String>>,
    }

    impl FakeExtractor {
        fn new(documents: &[(&str, &[&str])]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(name, pages)| {
                        (name.to_string(), pages.iter().map(|p| p.to_string()).collect())
                    })
                    .collect(),
            }
        }
    }

    impl TextExtractor for FakeExtractor {
        fn extract_pages(&self, path: &Path) -> crate::pdf::Result<Vec<String>> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            self.documents
                .get(name)
                .cloned()
                .ok_or_else(|| PdfError::Parse(format!("cannot open {}", name)))
        }
    }

    fn folder_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in files {
            fs::write(dir.path().join(name), b"%PDF-1.5").unwrap();
        }
        dir
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let aggregator = Aggregator::new(FakeExtractor::new(&[]));
        let tally = aggregator.tally_document(&["x;*3;\nx;*5;"]);
        assert_eq!(tally.totals.get("x"), Some(3));
        assert_eq!(tally.lines_matched, 2);
    }

    #[test]
    fn test_without_dedupe_sums_every_line() {
        let aggregator = Aggregator::new(FakeExtractor::new(&[])).with_dedupe(false);
        let tally = aggregator.tally_document(&["x;*3;\nx;*5;"]);
        assert_eq!(tally.totals.get("x"), Some(8));
    }

    #[test]
    fn test_dedupe_spans_pages() {
        let aggregator = Aggregator::new(FakeExtractor::new(&[]));
        let tally = aggregator.tally_document(&["x;*3;", "x;*5;\ny;*1;"]);
        assert_eq!(tally.totals.get("x"), Some(3));
        assert_eq!(tally.totals.get("y"), Some(1));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let dir = folder_with(&["label.pdf"]);
        let extractor = FakeExtractor::new(&[("label.pdf", &["yudu01;*2;\nabc-9;*1;\nyudu01;*3;"])]);

        let report = Aggregator::new(extractor).aggregate(dir.path()).unwrap();

        let rows: Vec<(&str, u64)> = report.totals.iter().collect();
        assert_eq!(rows, vec![("yudu01", 2), ("abc-9", 1)]);
        assert_eq!(
            report.documents[0].status,
            DocumentStatus::Counted {
                pages: 1,
                lines_matched: 3,
                skus: 2
            }
        );
    }

    #[test]
    fn test_sums_across_documents() {
        let dir = folder_with(&["a.pdf", "b.pdf"]);
        let extractor = FakeExtractor::new(&[
            ("a.pdf", &["x;*2;"]),
            ("b.pdf", &["x;*7;\ny;*1;"]),
        ]);

        let totals = aggregate(&extractor, dir.path(), true).unwrap();
        assert_eq!(totals.get("x"), Some(9));
        assert_eq!(totals.get("y"), Some(1));
    }

    #[test]
    fn test_dedupe_is_per_document_not_per_batch() {
        let dir = folder_with(&["a.pdf", "b.pdf"]);
        let extractor = FakeExtractor::new(&[("a.pdf", &["x;*2;"]), ("b.pdf", &["x;*2;"])]);

        let totals = aggregate(&extractor, dir.path(), true).unwrap();
        assert_eq!(totals.get("x"), Some(4));
    }

    #[test]
    fn test_order_does_not_change_sums() {
        let dir = folder_with(&["1.pdf", "2.pdf"]);
        let forward = FakeExtractor::new(&[("1.pdf", &["x;*2;\ny;*4;"]), ("2.pdf", &["y;*1;\nx;*3;"])]);
        let swapped = FakeExtractor::new(&[("1.pdf", &["y;*1;\nx;*3;"]), ("2.pdf", &["x;*2;\ny;*4;"])]);

        let a = aggregate(&forward, dir.path(), true).unwrap();
        let b = aggregate(&swapped, dir.path(), true).unwrap();
        for sku in ["x", "y"] {
            assert_eq!(a.get(sku), b.get(sku));
        }
    }

    #[test]
    fn test_rerun_is_identical() {
        let dir = folder_with(&["a.pdf", "b.pdf"]);
        let extractor = FakeExtractor::new(&[("a.pdf", &["x;*2;\nz;*1;"]), ("b.pdf", &["y;*5;"])]);
        let aggregator = Aggregator::new(&extractor);

        let first = aggregator.aggregate(dir.path()).unwrap().totals;
        let second = aggregator.aggregate(dir.path()).unwrap().totals;
        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_document_contributes_nothing() {
        let dir = folder_with(&["bad.pdf", "good.pdf"]);
        let extractor = FakeExtractor::new(&[("good.pdf", &["x;*1;"])]);

        let report = Aggregator::new(extractor).aggregate(dir.path()).unwrap();
        assert_eq!(report.totals.len(), 1);
        assert_eq!(report.totals.get("x"), Some(1));

        let failed: Vec<_> = report.failed().collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].path.ends_with("bad.pdf"));
        assert_eq!(report.counted().count(), 1);
    }

    #[test]
    fn test_empty_folder() {
        let dir = folder_with(&[]);
        let report = Aggregator::new(FakeExtractor::new(&[])).aggregate(dir.path()).unwrap();
        assert!(report.totals.is_empty());
        assert!(report.documents.is_empty());
    }

    #[test]
    fn test_missing_folder_is_an_error() {
        let result = Aggregator::new(FakeExtractor::new(&[])).aggregate(Path::new("/nonexistent/labels"));
        assert!(result.is_err());
    }

    #[test]
    fn test_list_documents_filters_by_suffix() {
        let dir = folder_with(&["b.pdf", "a.pdf", "notes.txt", "UPPER.PDF", "2024-01-01.xlsx"]);
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let aggregator = Aggregator::new(FakeExtractor::new(&[]));
        let names: Vec<String> = aggregator
            .list_documents(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_custom_suffix() {
        let dir = folder_with(&["a.pdf", "b.PDF"]);
        let extractor = FakeExtractor::new(&[("b.PDF", &["k;*4;"])]);

        let totals = Aggregator::new(extractor)
            .with_suffix(".PDF")
            .aggregate(dir.path())
            .unwrap()
            .totals;
        assert_eq!(totals.get("k"), Some(4));
        assert_eq!(totals.len(), 1);
    }

    #[test]
    fn test_from_config() {
        let dir = folder_with(&["a.pdf"]);
        let extractor = FakeExtractor::new(&[("a.pdf", &["x;*3;\nx;*5;"])]);
        let config = TallyConfig {
            dedupe_per_document: false,
            ..Default::default()
        };

        let totals = Aggregator::from_config(extractor, &config)
            .aggregate(dir.path())
            .unwrap()
            .totals;
        assert_eq!(totals.get("x"), Some(8));
    }

    #[test]
    fn test_progress_callback() {
        let dir = folder_with(&["a.pdf", "b.pdf"]);
        let extractor = FakeExtractor::new(&[("a.pdf", &["x;*1;"])]);

        let mut seen = Vec::new();
        Aggregator::new(extractor)
            .aggregate_with_progress(dir.path(), |outcome, total| {
                seen.push((outcome.is_failed(), total));
            })
            .unwrap();
        assert_eq!(seen, vec![(false, 2), (true, 2)]);
    }
}
