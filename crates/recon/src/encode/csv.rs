//! One CSV file per section.
//!
//! Detail files repeat the XLSX layout: metadata lines first, then the
//! header and rows.

use std::path::{Path, PathBuf};

use crate::error::{ReconError, Result};
use crate::report::{DetailSection, ReportModel};

/// Writes report sections as CSV text.
#[derive(Debug, Clone)]
pub struct CsvEncoder {
    delimiter: u8,
}

impl Default for CsvEncoder {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn writer(&self) -> csv::Writer<Vec<u8>> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_writer(Vec::new())
    }

    pub fn encode_summary(&self, report: &ReportModel) -> Result<Vec<u8>> {
        let mut wtr = self.writer();
        wtr.write_record(["Metric", "Value"])?;
        for metric in &report.summary {
            wtr.write_record([metric.name.clone(), metric.value.to_string()])?;
        }
        finish(wtr)
    }

    pub fn encode_section(&self, section: &DetailSection) -> Result<Vec<u8>> {
        let mut wtr = self.writer();
        for entry in &section.metadata {
            wtr.write_record([entry.to_string()])?;
        }
        wtr.write_record(&section.columns)?;
        for row in &section.rows {
            wtr.write_record(
                section
                    .columns
                    .iter()
                    .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default()),
            )?;
        }
        finish(wtr)
    }
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    wtr.into_inner()
        .map_err(|e| ReconError::Csv(csv::Error::from(e.into_error())))
}

/// Write `summary.csv` plus one file per detail section into `dir`,
/// creating it if needed. Returns the written paths in report order.
pub fn write_csv_dir(report: &ReportModel, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let io_err = |path: &Path, source: std::io::Error| ReconError::Io {
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let encoder = CsvEncoder::new();
    let mut files = vec![("summary".to_string(), encoder.encode_summary(report)?)];
    for section in report.sections() {
        files.push((section.kind.file_stem().to_string(), encoder.encode_section(section)?));
    }

    let mut written = Vec::with_capacity(files.len());
    for (stem, bytes) in files {
        let path = dir.join(format!("{}.csv", stem));
        std::fs::write(&path, bytes).map_err(|e| io_err(&path, e))?;
        written.push(path);
    }

    tracing::debug!(dir = %dir.display(), files = written.len(), "wrote csv report");
    Ok(written)
}
