//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use recon::ReportFormat;
use std::path::PathBuf;

/// Recon: reconcile two tabular exports on a shared key column
#[derive(Parser)]
#[command(name = "recon")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile two files and write a report
    Reconcile {
        /// Dataset A (CSV/TSV/XLSX/XLS/ODS)
        #[arg(value_name = "FILE_A")]
        file_a: PathBuf,

        /// Dataset B (CSV/TSV/XLSX/XLS/ODS)
        #[arg(value_name = "FILE_B")]
        file_b: PathBuf,

        /// Primary-key column used for matching
        #[arg(short, long)]
        key: String,

        /// Secondary key column, recorded in the report only (repeatable)
        #[arg(short, long = "secondary-key", value_name = "COLUMN")]
        secondary_keys: Vec<String>,

        /// Output path (default: reconciliation_report.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "xlsx")]
        format: ReportFormat,
    },

    /// Show the columns and size of a data file
    Inspect {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the upload service
    Serve(ServeArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "RECON_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port for web server
    #[arg(short, long, env = "RECON_PORT", default_value = "5000")]
    pub port: u16,

    /// Maximum upload size per request, in megabytes
    #[arg(long, env = "RECON_MAX_UPLOAD_MB", default_value = "50")]
    pub max_upload_mb: usize,

    /// Don't automatically open browser
    #[arg(long)]
    pub no_open: bool,
}
