//! Keyed outer-join partitioning of two datasets.
//!
//! Every input row lands in exactly one group: rows whose key exists on both
//! sides are paired (the full cross product within a key group), the rest are
//! reported as A-only or B-only. The output order is fixed: keys are visited
//! in first-appearance order of dataset A, then the keys only B has, and rows
//! keep their source order within a key group.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::ReconConfig;
use crate::dataset::{Dataset, Row};
use crate::error::{ReconError, Result};
use crate::value::MatchKey;

/// Source row indices that produced an output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RowOrigin {
    /// Index into dataset A, if the row came from A.
    pub a: Option<usize>,
    /// Index into dataset B, if the row came from B.
    pub b: Option<usize>,
}

/// One output group with its own column layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowGroup {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// Parallel to `rows`.
    #[serde(skip)]
    pub origins: Vec<RowOrigin>,
}

impl RowGroup {
    fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            origins: Vec::new(),
        }
    }

    fn push(&mut self, row: Row, origin: RowOrigin) {
        self.rows.push(row);
        self.origins.push(origin);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three-way classification of all input rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    pub primary_key: String,
    pub matched: RowGroup,
    pub a_only: RowGroup,
    pub b_only: RowGroup,
}

/// Reconcile two datasets on `primary_key` with the default column suffixes.
pub fn reconcile(a: &Dataset, b: &Dataset, primary_key: &str) -> Result<Partition> {
    reconcile_with(a, b, primary_key, &ReconConfig::default())
}

/// Reconcile two datasets on `primary_key`.
///
/// Fails with [`ReconError::MissingKeyColumn`] before doing any work if
/// either schema lacks the key, and with [`ReconError::InvalidConfig`] if a
/// column suffix is empty.
pub fn reconcile_with(
    a: &Dataset,
    b: &Dataset,
    primary_key: &str,
    config: &ReconConfig,
) -> Result<Partition> {
    let missing_in: Vec<String> = [a, b]
        .iter()
        .filter(|ds| primary_key.is_empty() || !ds.has_column(primary_key))
        .map(|ds| ds.name.clone())
        .collect();
    if !missing_in.is_empty() {
        return Err(ReconError::MissingKeyColumn {
            key: primary_key.to_string(),
            missing_in,
        });
    }
    if config.suffix_a.is_empty() || config.suffix_b.is_empty() {
        return Err(ReconError::InvalidConfig(
            "column suffixes must not be empty".to_string(),
        ));
    }

    let layout = MatchedLayout::new(a.columns(), b.columns(), primary_key, config);
    let a_index = key_index(a, primary_key);
    let b_index = key_index(b, primary_key);

    let mut matched = RowGroup::new(layout.columns());
    let mut a_only = RowGroup::new(a.columns().to_vec());
    let mut b_only = RowGroup::new(b.columns().to_vec());

    for (key, a_rows) in &a_index {
        match b_index.get(key) {
            Some(b_rows) => {
                for &ia in a_rows {
                    for &ib in b_rows {
                        matched.push(
                            layout.combine(&a.rows()[ia], &b.rows()[ib]),
                            RowOrigin { a: Some(ia), b: Some(ib) },
                        );
                    }
                }
            }
            None => {
                for &ia in a_rows {
                    a_only.push(a.rows()[ia].clone(), RowOrigin { a: Some(ia), b: None });
                }
            }
        }
    }

    for (key, b_rows) in &b_index {
        if a_index.contains_key(key) {
            continue;
        }
        for &ib in b_rows {
            b_only.push(b.rows()[ib].clone(), RowOrigin { a: None, b: Some(ib) });
        }
    }

    Ok(Partition {
        primary_key: primary_key.to_string(),
        matched,
        a_only,
        b_only,
    })
}

/// Map each key to the indices of the rows carrying it, in first-appearance order.
fn key_index(ds: &Dataset, primary_key: &str) -> IndexMap<MatchKey, Vec<usize>> {
    let mut index: IndexMap<MatchKey, Vec<usize>> = IndexMap::new();
    for (idx, row) in ds.rows().iter().enumerate() {
        let key = row
            .get(primary_key)
            .map(|v| v.match_key())
            .unwrap_or(MatchKey::Null);
        index.entry(key).or_default().push(idx);
    }
    index
}

/// Column mapping for combined rows: all of A's columns, then B's non-key
/// columns, with shared non-key names suffixed per side.
struct MatchedLayout {
    /// (source column in A, output column)
    a_columns: Vec<(String, String)>,
    /// (source column in B, output column)
    b_columns: Vec<(String, String)>,
}

impl MatchedLayout {
    fn new(a: &[String], b: &[String], primary_key: &str, config: &ReconConfig) -> Self {
        let b_set: HashSet<&str> = b.iter().map(String::as_str).collect();
        let shared: HashSet<&str> = a
            .iter()
            .map(String::as_str)
            .filter(|c| *c != primary_key && b_set.contains(c))
            .collect();

        // Unsuffixed names keep priority over generated ones.
        let mut taken: HashSet<String> = a
            .iter()
            .chain(b.iter())
            .filter(|c| !shared.contains(c.as_str()))
            .cloned()
            .collect();

        let mut rename = |column: &str, suffix: &str| -> String {
            if !shared.contains(column) {
                return column.to_string();
            }
            let mut candidate = format!("{}{}", column, suffix);
            while taken.contains(&candidate) {
                candidate.push_str(suffix);
            }
            taken.insert(candidate.clone());
            candidate
        };

        let a_columns = a
            .iter()
            .map(|c| (c.clone(), rename(c, &config.suffix_a)))
            .collect();
        let b_columns = b
            .iter()
            .filter(|c| c.as_str() != primary_key)
            .map(|c| (c.clone(), rename(c, &config.suffix_b)))
            .collect();

        Self { a_columns, b_columns }
    }

    fn columns(&self) -> Vec<String> {
        self.a_columns
            .iter()
            .chain(&self.b_columns)
            .map(|(_, out)| out.clone())
            .collect()
    }

    fn combine(&self, a_row: &Row, b_row: &Row) -> Row {
        let mut row = Row::with_capacity(self.a_columns.len() + self.b_columns.len());
        for (src, out) in &self.a_columns {
            row.insert(out.clone(), a_row.get(src).cloned().unwrap_or_default());
        }
        for (src, out) in &self.b_columns {
            row.insert(out.clone(), b_row.get(src).cloned().unwrap_or_default());
        }
        row
    }
}
