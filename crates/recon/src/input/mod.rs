//! Loading source files into datasets.

mod parser;
mod source;
mod workbook;

use std::collections::HashSet;
use std::path::Path;

pub use parser::{Parser, ParserConfig, is_null_value};
pub use source::{SourceMetadata, content_hash};
pub use workbook::parse_workbook;

use crate::dataset::Dataset;
use crate::error::{ReconError, Result};

/// Physical format of a source file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Delimited,
    Workbook,
}

impl SourceFormat {
    /// Pick the format from a file name's extension.
    pub fn from_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "tsv" | "txt" | "psv" => Ok(SourceFormat::Delimited),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Workbook),
            "" => Err(ReconError::UnsupportedFormat(format!(
                "'{}' has no file extension",
                name
            ))),
            other => Err(ReconError::UnsupportedFormat(format!(
                "'.{}' (expected csv, tsv, xlsx, xls or ods)",
                other
            ))),
        }
    }
}

/// Loads files into [`Dataset`]s, dispatching on the file extension.
#[derive(Default)]
pub struct Loader {
    parser: Parser,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            parser: Parser::with_config(config),
        }
    }

    /// Load an in-memory file. `name` names the dataset and selects the format.
    pub fn load_bytes(&self, name: &str, bytes: &[u8]) -> Result<(Dataset, SourceMetadata)> {
        let (dataset, format) = match SourceFormat::from_name(name)? {
            SourceFormat::Delimited => {
                let (dataset, delimiter) = self.parser.parse_bytes(name, bytes)?;
                (dataset, delimited_format_name(delimiter))
            }
            SourceFormat::Workbook => {
                let ext = Path::new(name)
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                (parse_workbook(name, bytes)?, ext)
            }
        };

        let metadata = SourceMetadata::new(
            name,
            bytes,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        tracing::debug!(
            source = name,
            format = %metadata.format,
            rows = metadata.row_count,
            columns = metadata.column_count,
            hash = %metadata.hash,
            "loaded source"
        );

        Ok((dataset, metadata))
    }

    /// Load a file from disk; the dataset is named after the file name.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ReconError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.load_bytes(&name, &bytes)
    }
}

fn delimited_format_name(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
    .to_string()
}

/// Make header names usable as a schema: blanks become `Unnamed: <i>` and
/// repeated names get `.1`, `.2`, ... appended.
pub(crate) fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut headers = Vec::with_capacity(raw.len());

    for (idx, header) in raw.into_iter().enumerate() {
        let base = match header.trim() {
            "" => format!("Unnamed: {}", idx),
            trimmed => trimmed.to_string(),
        };

        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, n);
            n += 1;
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}
