//! Spreadsheet export of the SKU summary.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ExportError, TallyError};
use crate::models::sku::SummaryRow;
use crate::models::totals::BatchTotals;

/// Header row of the summary table.
pub const HEADERS: [&str; 2] = ["SKU Code", "Total Quantity"];

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Writes summary rows to a persisted table.
pub trait SummaryExporter {
    /// Write `rows` to `path`, replacing any existing file.
    fn export(&self, rows: &[SummaryRow], path: &Path) -> Result<()>;
}

/// Excel workbook exporter.
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    worksheet_name: String,
}

impl XlsxExporter {
    pub fn new() -> Self {
        Self {
            worksheet_name: "SKU Counts".to_string(),
        }
    }

    /// Set the worksheet name.
    pub fn with_worksheet_name(mut self, name: impl Into<String>) -> Self {
        self.worksheet_name = name.into();
        self
    }

    /// Render the workbook into memory.
    pub fn render(&self, rows: &[SummaryRow]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.worksheet_name)?;

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let row_num = (i + 1) as u32;
            worksheet.write_string(row_num, 0, &row.sku_code)?;
            worksheet.write_number(row_num, 1, row.total_quantity as f64)?;
        }

        worksheet.set_column_width(0, 20)?;
        worksheet.set_column_width(1, 16)?;

        Ok(workbook.save_to_buffer()?)
    }
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryExporter for XlsxExporter {
    fn export(&self, rows: &[SummaryRow], path: &Path) -> Result<()> {
        let data = self.render(rows)?;
        write_atomically(path, &data)?;
        debug!("Wrote {} summary rows to {}", rows.len(), path.display());
        Ok(())
    }
}

/// Export `totals` to `path` with `exporter`.
///
/// Nothing is written when `totals` is empty; the result is then `None`.
pub fn export_summary<X: SummaryExporter + ?Sized>(
    exporter: &X,
    totals: &BatchTotals,
    path: &Path,
) -> std::result::Result<Option<PathBuf>, TallyError> {
    if totals.is_empty() {
        debug!("No SKU data, skipping export to {}", path.display());
        return Ok(None);
    }

    exporter.export(&totals.summary_rows(), path)?;
    Ok(Some(path.to_path_buf()))
}

/// Write `data` to a temporary file next to `path`, then rename it into place.
///
/// The target is either fully replaced or left untouched.
pub fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(data).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;

    // Dropping the PersistError removes the temporary file.
    tmp.persist(path).map_err(|e| ExportError::Persist {
        path: path.to_path_buf(),
        reason: e.error.to_string(),
    })?;
    Ok(())
}

/// Default summary location: `<folder>/<YYYY-MM-DD>.xlsx`.
pub fn default_output_path(folder: &Path, date: NaiveDate) -> PathBuf {
    folder.join(format!("{}.xlsx", date.format("%Y-%m-%d")))
}
