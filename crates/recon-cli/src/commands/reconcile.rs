//! Reconcile command - match two files and write the report.

use std::path::PathBuf;

use colored::Colorize;
use recon::{
    KeyConfig, LoadedSource, ReconError, Reconciler, ReportFormat, ReportModel, write_csv_dir,
};

const DEFAULT_OUTPUT_STEM: &str = "reconciliation_report";

pub fn run(
    file_a: PathBuf,
    file_b: PathBuf,
    key: String,
    secondary_keys: Vec<String>,
    output: Option<PathBuf>,
    format: ReportFormat,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for file in [&file_a, &file_b] {
        if !file.exists() {
            return Err(format!("File not found: {}", file.display()).into());
        }
    }

    println!(
        "{} {} {} {}",
        "Reconciling".cyan().bold(),
        file_a.display().to_string().white(),
        "against".cyan(),
        file_b.display().to_string().white()
    );

    let reconciler = Reconciler::new();
    let a = reconciler.load_file(&file_a)?;
    let b = reconciler.load_file(&file_b)?;

    if verbose {
        print_source(&a);
        print_source(&b);
    }

    let keys = KeyConfig::new(key).with_secondary_keys(secondary_keys);
    let report = match reconciler.reconcile_sources(&a, &b, &keys) {
        Ok(report) => report,
        Err(err @ ReconError::MissingKeyColumn { .. }) => {
            eprintln!("{} available columns:", "Hint:".yellow());
            eprintln!("  {}: {}", a.dataset.name, a.dataset.columns().join(", "));
            eprintln!("  {}: {}", b.dataset.name, b.dataset.columns().join(", "));
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    let output = output.unwrap_or_else(|| default_output(format));
    match format.encoder() {
        Some(encoder) => {
            let bytes = encoder.encode(&report)?;
            std::fs::write(&output, bytes)?;
            println!();
            println!("Report written to {}", output.display().to_string().green());
        }
        None => {
            let written = write_csv_dir(&report, &output)?;
            println!();
            println!(
                "Report written to {} ({} files)",
                output.display().to_string().green(),
                written.len()
            );
        }
    }

    println!();
    print_summary(&report);

    Ok(())
}

/// `reconciliation_report.xlsx`, `.json`, or a directory for CSV output.
fn default_output(format: ReportFormat) -> PathBuf {
    match format {
        ReportFormat::Csv => PathBuf::from(DEFAULT_OUTPUT_STEM),
        _ => PathBuf::from(format!("{}.{}", DEFAULT_OUTPUT_STEM, format)),
    }
}

fn print_source(source: &LoadedSource) {
    let meta = &source.metadata;
    println!(
        "  {} {} rows x {} columns ({}, {})",
        meta.file.white(),
        meta.row_count,
        meta.column_count,
        meta.format,
        meta.hash.dimmed()
    );
}

fn print_summary(report: &ReportModel) {
    println!("{}", "Summary:".yellow().bold());
    for metric in &report.summary {
        println!("  {:22} {}", metric.name, metric.value.to_string().white().bold());
    }

    let unmatched = report.a_only.rows.len() + report.b_only.rows.len();
    if unmatched == 0 {
        println!();
        println!("{}", "All rows matched.".green());
    }
}
