//! JSON layout: `{ run?, summary: [...], sections: [...] }`.

use serde::Serialize;

use crate::dataset::Row;
use crate::error::Result;
use crate::report::{DetailSection, MetadataEntry, Metric, ReportModel, RunInfo, SectionKind};

use super::ReportEncoder;

#[derive(Debug, Default, Clone)]
pub struct JsonEncoder {
    compact: bool,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a single line instead of pretty-printed output.
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    run: Option<&'a RunInfo>,
    summary: &'a [Metric],
    sections: Vec<JsonSection<'a>>,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    title: &'static str,
    kind: SectionKind,
    metadata: &'a [MetadataEntry],
    columns: &'a [String],
    rows: &'a [Row],
}

impl<'a> From<&'a DetailSection> for JsonSection<'a> {
    fn from(section: &'a DetailSection) -> Self {
        Self {
            title: section.title(),
            kind: section.kind,
            metadata: &section.metadata,
            columns: &section.columns,
            rows: &section.rows,
        }
    }
}

impl ReportEncoder for JsonEncoder {
    fn encode(&self, report: &ReportModel) -> Result<Vec<u8>> {
        let doc = JsonReport {
            run: report.run.as_ref(),
            summary: &report.summary,
            sections: report.sections().into_iter().map(JsonSection::from).collect(),
        };

        let bytes = if self.compact {
            serde_json::to_vec(&doc)?
        } else {
            serde_json::to_vec_pretty(&doc)?
        };
        Ok(bytes)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
