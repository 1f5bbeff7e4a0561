//! Inspect command - list the columns of a data file.

use std::path::PathBuf;

use colored::Colorize;
use recon::Reconciler;

pub fn run(
    file: PathBuf,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let source = Reconciler::new().load_file(&file)?;
    let meta = &source.metadata;

    if json_output {
        let info = serde_json::json!({
            "file": meta.file,
            "format": meta.format,
            "hash": meta.hash,
            "size_bytes": meta.size_bytes,
            "row_count": meta.row_count,
            "columns": source.dataset.columns(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} {}", "Columns of".cyan().bold(), meta.file.white());
    println!();
    for (i, column) in source.dataset.columns().iter().enumerate() {
        println!("  {:>3}  {}", i + 1, column);
    }
    println!();
    println!(
        "{} rows, {} columns ({})",
        meta.row_count.to_string().white().bold(),
        meta.column_count,
        meta.format
    );

    println!("Hash: {}", meta.hash.dimmed());

    if verbose {
        println!("Size: {} bytes", meta.size_bytes);
        println!("Loaded: {}", meta.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    Ok(())
}
