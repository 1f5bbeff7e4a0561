//! Report encoders.
//!
//! Each encoder lays out the same four logical sections (summary, then the
//! reconciled, A-only and B-only details) and keeps their field order.

mod csv;
mod json;
mod xlsx;

pub use self::csv::{CsvEncoder, write_csv_dir};
pub use self::json::JsonEncoder;
pub use self::xlsx::{DETAIL_HEADER_ROW, XlsxEncoder};

use crate::error::Result;
use crate::report::ReportModel;

/// Serializes a [`ReportModel`] into one output file.
pub trait ReportEncoder: Send + Sync {
    fn encode(&self, report: &ReportModel) -> Result<Vec<u8>>;

    /// MIME type of the encoded bytes.
    fn content_type(&self) -> &'static str;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;
}

/// Supported report formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Json,
    /// One CSV file per section, written to a directory.
    Csv,
}

impl ReportFormat {
    /// Encoder for single-file formats. CSV output spans several files and
    /// goes through [`write_csv_dir`] instead.
    pub fn encoder(self) -> Option<Box<dyn ReportEncoder>> {
        match self {
            ReportFormat::Xlsx => Some(Box::new(XlsxEncoder::new())),
            ReportFormat::Json => Some(Box::new(JsonEncoder::new())),
            ReportFormat::Csv => None,
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ReportFormat::Xlsx),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use xlsx, json, or csv.", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Xlsx => write!(f, "xlsx"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}
