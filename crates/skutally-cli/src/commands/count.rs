//! Count command - total SKU quantities across a folder of labels.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use skutally_core::models::report::{AggregationReport, DocumentStatus};
use skutally_core::{export_summary, Aggregator, PdfTextExtractor, TallyConfig, XlsxExporter};

use super::config::load_config;

/// Arguments for the count command.
#[derive(Args, Default)]
pub struct CountArgs {
    /// Folder containing label documents (overrides `label_folder`)
    folder: Option<PathBuf>,

    /// Count every matching line, even repeats within one document
    #[arg(long)]
    no_dedupe: bool,

    /// Output file (default: <folder>/<YYYY-MM-DD>.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File name suffix of label documents (case-sensitive)
    #[arg(long)]
    suffix: Option<String>,

    /// Print the summary without writing a spreadsheet
    #[arg(long)]
    no_export: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl CountArgs {
    fn apply(&self, config: &mut TallyConfig) {
        if let Some(folder) = &self.folder {
            config.label_folder = folder.clone();
        }
        if self.no_dedupe {
            config.dedupe_per_document = false;
        }
        if let Some(output) = &self.output {
            config.output_path = Some(output.clone());
        }
        if let Some(suffix) = &self.suffix {
            config.document_suffix = suffix.clone();
        }
    }
}

pub fn run(args: CountArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.apply(&mut config);
    debug!("Effective configuration: {:?}", config);

    let folder = config.label_folder.clone();
    if !folder.is_dir() {
        anyhow::bail!("Label folder not found: {}", folder.display());
    }

    let quiet = args.json;
    if !quiet {
        println!(
            "{} Counting labels in {}",
            style("ℹ").blue(),
            folder.display()
        );
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} labels")?
            .progress_chars("=>-"),
    );

    let aggregator = Aggregator::from_config(PdfTextExtractor, &config);
    let report = aggregator.aggregate_with_progress(&folder, |outcome, total| {
        pb.set_length(total as u64);
        if !quiet {
            pb.suspend(|| print_outcome(&outcome.path, &outcome.status));
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    if quiet {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, start);
    }

    if report.totals.is_empty() {
        if !quiet {
            println!(
                "{} No SKU data found. Please check the extraction logic or input data.",
                style("!").yellow()
            );
        }
        return Ok(());
    }

    if args.no_export {
        return Ok(());
    }

    let output_path = config.output_path_for(chrono::Local::now().date_naive());
    let exporter = XlsxExporter::new().with_worksheet_name(config.worksheet_name.clone());
    let written = export_summary(&exporter, &report.totals, &output_path)?;

    if let (Some(output_path), false) = (written, quiet) {
        println!();
        println!(
            "{} SKU Counts Summary saved to {}",
            style("✓").green(),
            output_path.display()
        );
    }

    Ok(())
}

fn print_outcome(path: &Path, status: &DocumentStatus) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match status {
        DocumentStatus::Counted { pages, lines_matched, skus } => println!(
            "  {} {}: {} pages, {} SKU lines, {} SKUs",
            style("✓").green(),
            name,
            pages,
            lines_matched,
            skus
        ),
        DocumentStatus::Failed { reason } => println!(
            "  {} {}: {}",
            style("✗").red(),
            name,
            reason
        ),
    }
}

fn print_summary(report: &AggregationReport, start: Instant) {
    let failed: Vec<_> = report.failed().collect();

    println!();
    println!(
        "{} Processed {} labels in {:?}",
        style("✓").green(),
        report.documents.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(report.counted().count()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            if let DocumentStatus::Failed { reason } = &outcome.status {
                println!("  - {}: {}", outcome.path.display(), reason);
            }
        }
    }

    println!();
    println!("SKU Counts Summary (Total Quantity per SKU):");
    for (sku, count) in report.totals.iter() {
        println!("  {}: {}", sku, count);
    }
}
