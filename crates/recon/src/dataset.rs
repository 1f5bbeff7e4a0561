//! Named, schema-checked tabular datasets.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{ReconError, Result};
use crate::value::CellValue;

/// A row: column name to value, in schema order.
pub type Row = IndexMap<String, CellValue>;

/// An ordered sequence of rows sharing one column schema.
///
/// Invariants (checked on construction): column names are distinct and every
/// row's keys equal the schema, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// Source name, usually the uploaded file name.
    pub name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset from keyed rows.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let name = name.into();
        check_distinct(&name, &columns)?;

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() || !row.keys().zip(&columns).all(|(k, c)| k == c) {
                return Err(ReconError::malformed(
                    &name,
                    format!("row {} does not match the column schema", idx + 1),
                ));
            }
        }

        Ok(Self { name, columns, rows })
    }

    /// Create a dataset from positional records.
    ///
    /// Short records are padded with nulls and long records truncated, so
    /// the schema invariant always holds.
    pub fn from_records(
        name: impl Into<String>,
        columns: Vec<String>,
        records: Vec<Vec<CellValue>>,
    ) -> Result<Self> {
        let name = name.into();
        check_distinct(&name, &columns)?;

        let rows = records
            .into_iter()
            .map(|mut record| {
                record.resize(columns.len(), CellValue::Null);
                columns.iter().cloned().zip(record).collect::<Row>()
            })
            .collect();

        Ok(Self { name, columns, rows })
    }

    /// Column names in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// All values of one column, in row order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows.iter().filter_map(move |row| row.get(column))
    }
}

fn check_distinct(name: &str, columns: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(ReconError::malformed(
                name,
                format!("duplicate column name '{}'", column),
            ));
        }
    }
    Ok(())
}
