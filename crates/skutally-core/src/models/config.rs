//! Configuration for a tally run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::export::default_output_path;

/// Main configuration for skutally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TallyConfig {
    /// Folder containing the label documents.
    pub label_folder: PathBuf,

    /// Count each SKU at most once per document.
    pub dedupe_per_document: bool,

    /// Where to write the summary (default: `<label_folder>/<YYYY-MM-DD>.xlsx`).
    pub output_path: Option<PathBuf>,

    /// File name suffix that marks a label document (case-sensitive).
    pub document_suffix: String,

    /// Name of the worksheet holding the summary.
    pub worksheet_name: String,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            label_folder: PathBuf::from("."),
            dedupe_per_document: true,
            output_path: None,
            document_suffix: ".pdf".to_string(),
            worksheet_name: "SKU Counts".to_string(),
        }
    }
}

impl TallyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Summary file path for a run on `date`.
    pub fn output_path_for(&self, date: NaiveDate) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| default_output_path(&self.label_folder, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = TallyConfig::default();
        assert!(config.dedupe_per_document);
        assert_eq!(config.document_suffix, ".pdf");
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TallyConfig =
            serde_json::from_str(r#"{"label_folder": "/labels", "dedupe_per_document": false}"#)
                .unwrap();
        assert_eq!(config.label_folder, PathBuf::from("/labels"));
        assert!(!config.dedupe_per_document);
        assert_eq!(config.worksheet_name, "SKU Counts");
    }

    #[test]
    fn test_output_path_for() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let mut config = TallyConfig {
            label_folder: PathBuf::from("labels"),
            ..Default::default()
        };
        assert_eq!(
            config.output_path_for(date),
            PathBuf::from("labels").join("2024-03-09.xlsx")
        );

        config.output_path = Some(PathBuf::from("out/summary.xlsx"));
        assert_eq!(config.output_path_for(date), PathBuf::from("out/summary.xlsx"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = TallyConfig {
            label_folder: PathBuf::from("/srv/labels"),
            dedupe_per_document: false,
            ..Default::default()
        };
        config.save(&path).unwrap();

        assert_eq!(TallyConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = TallyConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
