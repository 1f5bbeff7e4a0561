//! The format-independent report structure.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::dataset::Row;
use crate::input::SourceMetadata;

/// Summary metric labels, in report order.
pub const METRIC_FILE_A: &str = "File A";
pub const METRIC_FILE_B: &str = "File B";
pub const METRIC_MATCHED: &str = "Matched Rows";
pub const METRIC_A_ONLY: &str = "Unmatched in File A";
pub const METRIC_B_ONLY: &str = "Unmatched in File B";

/// Detail metadata labels, in report order.
pub const META_PRIMARY_KEY: &str = "Primary Key";
pub const META_SECONDARY_KEYS: &str = "Secondary Keys";
pub const META_FILE_A: &str = "File A";
pub const META_FILE_B: &str = "File B";

/// Shown in place of the secondary keys when none were given.
pub const NO_SECONDARY_KEYS: &str = "None";

/// A complete reconciliation report: one summary and three detail sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    /// Run envelope; absent unless attached by the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunInfo>,
    pub summary: Vec<Metric>,
    pub matched: DetailSection,
    pub a_only: DetailSection,
    pub b_only: DetailSection,
}

impl ReportModel {
    /// Detail sections in report order.
    pub fn sections(&self) -> [&DetailSection; 3] {
        [&self.matched, &self.a_only, &self.b_only]
    }

    /// Look up a summary metric by name.
    pub fn metric(&self, name: &str) -> Option<&MetricValue> {
        self.summary.iter().find(|m| m.name == name).map(|m| &m.value)
    }

    pub fn with_run_info(mut self, run: RunInfo) -> Self {
        self.run = Some(run);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    #[serde(rename = "metric")]
    pub name: String,
    pub value: MetricValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Text(String),
    Count(usize),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Text(s) => write!(f, "{}", s),
            MetricValue::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Which row group a detail section holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Reconciled,
    FileAOnly,
    FileBOnly,
}

impl SectionKind {
    /// Section title, also used as the worksheet name.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Reconciled => "Reconciled",
            SectionKind::FileAOnly => "FileA_Only",
            SectionKind::FileBOnly => "FileB_Only",
        }
    }

    /// Lowercase stem for per-section output files.
    pub fn file_stem(self) -> &'static str {
        match self {
            SectionKind::Reconciled => "reconciled",
            SectionKind::FileAOnly => "filea_only",
            SectionKind::FileBOnly => "fileb_only",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub label: String,
    pub value: String,
}

impl fmt::Display for MetadataEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// One annotated row group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailSection {
    pub kind: SectionKind,
    pub metadata: Vec<MetadataEntry>,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl DetailSection {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Identifies one reconciliation run. Kept out of the four logical sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunInfo {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub sources: Vec<SourceMetadata>,
}

impl RunInfo {
    pub fn new(sources: Vec<SourceMetadata>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            sources,
        }
    }
}
