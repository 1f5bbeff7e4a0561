//! Turns a partition into a report.

use crate::config::KeyConfig;
use crate::engine::{Partition, RowGroup};

use super::model::*;

/// Run metadata recorded in every detail section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    pub dataset_a: String,
    pub dataset_b: String,
    pub keys: KeyConfig,
}

impl RunMetadata {
    pub fn new(dataset_a: impl Into<String>, dataset_b: impl Into<String>, keys: KeyConfig) -> Self {
        Self {
            dataset_a: dataset_a.into(),
            dataset_b: dataset_b.into(),
            keys,
        }
    }

    fn secondary_keys_label(&self) -> String {
        if self.keys.secondary_keys.is_empty() {
            NO_SECONDARY_KEYS.to_string()
        } else {
            self.keys.secondary_keys.join(", ")
        }
    }

    fn metadata_block(&self) -> Vec<MetadataEntry> {
        [
            (META_PRIMARY_KEY, self.keys.primary_key.clone()),
            (META_SECONDARY_KEYS, self.secondary_keys_label()),
            (META_FILE_A, self.dataset_a.clone()),
            (META_FILE_B, self.dataset_b.clone()),
        ]
        .into_iter()
        .map(|(label, value)| MetadataEntry {
            label: label.to_string(),
            value,
        })
        .collect()
    }
}

/// Build the report for a partition. Never fails.
pub fn build_report(partition: Partition, meta: &RunMetadata) -> ReportModel {
    let summary = vec![
        metric(METRIC_FILE_A, MetricValue::Text(meta.dataset_a.clone())),
        metric(METRIC_FILE_B, MetricValue::Text(meta.dataset_b.clone())),
        metric(METRIC_MATCHED, MetricValue::Count(partition.matched.len())),
        metric(METRIC_A_ONLY, MetricValue::Count(partition.a_only.len())),
        metric(METRIC_B_ONLY, MetricValue::Count(partition.b_only.len())),
    ];

    let section = |kind: SectionKind, group: RowGroup| DetailSection {
        kind,
        metadata: meta.metadata_block(),
        columns: group.columns,
        rows: group.rows,
    };

    ReportModel {
        run: None,
        summary,
        matched: section(SectionKind::Reconciled, partition.matched),
        a_only: section(SectionKind::FileAOnly, partition.a_only),
        b_only: section(SectionKind::FileBOnly, partition.b_only),
    }
}

fn metric(name: &str, value: MetricValue) -> Metric {
    Metric {
        name: name.to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::engine::reconcile;
    use crate::value::CellValue;

    fn scenario() -> Partition {
        let a = Dataset::from_records(
            "a.xlsx",
            vec!["id".into(), "amt".into()],
            vec![vec![1i64.into(), 10i64.into()]],
        )
        .unwrap();
        let b = Dataset::from_records(
            "b.xlsx",
            vec!["id".into(), "amt".into()],
            vec![vec![1i64.into(), 10i64.into()], vec![2i64.into(), 5i64.into()]],
        )
        .unwrap();
        reconcile(&a, &b, "id").unwrap()
    }

    #[test]
    fn test_summary_order_and_counts() {
        let meta = RunMetadata::new("a.xlsx", "b.xlsx", KeyConfig::new("id"));
        let report = build_report(scenario(), &meta);

        let names: Vec<&str> = report.summary.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["File A", "File B", "Matched Rows", "Unmatched in File A", "Unmatched in File B"]
        );
        let values: Vec<String> = report.summary.iter().map(|m| m.value.to_string()).collect();
        assert_eq!(values, vec!["a.xlsx", "b.xlsx", "1", "0", "1"]);
        assert!(report.run.is_none());
    }

    #[test]
    fn test_metadata_block_without_secondary_keys() {
        let meta = RunMetadata::new("a.xlsx", "b.xlsx", KeyConfig::new("id"));
        let report = build_report(scenario(), &meta);

        for section in report.sections() {
            let lines: Vec<String> = section.metadata.iter().map(|m| m.to_string()).collect();
            assert_eq!(
                lines,
                vec![
                    "Primary Key: id",
                    "Secondary Keys: None",
                    "File A: a.xlsx",
                    "File B: b.xlsx",
                ]
            );
        }
    }

    #[test]
    fn test_secondary_keys_joined() {
        let keys = KeyConfig::new("id").with_secondary_keys(["Date", "Amount"]);
        let meta = RunMetadata::new("a", "b", keys);
        let report = build_report(scenario(), &meta);
        assert_eq!(report.b_only.metadata[1].value, "Date, Amount");
    }

    #[test]
    fn test_sections_carry_rows() {
        let meta = RunMetadata::new("a.xlsx", "b.xlsx", KeyConfig::new("id"));
        let report = build_report(scenario(), &meta);

        let titles: Vec<&str> = report.sections().iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["Reconciled", "FileA_Only", "FileB_Only"]);
        assert_eq!(report.matched.columns, vec!["id", "amt_A", "amt_B"]);
        assert!(report.a_only.rows.is_empty());
        assert_eq!(report.a_only.columns, vec!["id", "amt"]);
        assert_eq!(report.b_only.rows[0]["id"], CellValue::Number(2.0));
    }
}
