//! Recon: keyed reconciliation of two tabular datasets.
//!
//! Two datasets that share a primary-key column are partitioned with outer-join
//! semantics into rows found in both (matched), rows only in A and rows only
//! in B. The partition is then assembled into a report: a summary plus three
//! annotated detail sections, ready to encode as XLSX, JSON or CSV.
//!
//! # Core Principles
//!
//! - **Pure core**: matching and report building do no I/O and keep no state
//! - **Deterministic**: same inputs, same row order, same report
//! - **Typed failures**: a missing key column is an error, never a guess
//!
//! # Example
//!
//! ```no_run
//! use recon::{KeyConfig, ReportEncoder, Reconciler, XlsxEncoder};
//!
//! let reconciler = Reconciler::new();
//! let keys = KeyConfig::new("TransactionID");
//! let report = reconciler.reconcile_files("ledger.xlsx", "bank.csv", &keys).unwrap();
//!
//! let bytes = XlsxEncoder::new().encode(&report).unwrap();
//! std::fs::write("reconciliation_report.xlsx", bytes).unwrap();
//! ```

pub mod config;
pub mod dataset;
pub mod encode;
pub mod engine;
pub mod error;
pub mod input;
pub mod report;
pub mod value;

mod reconciler;

pub use crate::reconciler::{LoadedSource, Reconciler};
pub use config::{KeyConfig, ReconConfig};
pub use dataset::{Dataset, Row};
pub use encode::{CsvEncoder, JsonEncoder, ReportEncoder, ReportFormat, XlsxEncoder, write_csv_dir};
pub use engine::{Partition, RowGroup, RowOrigin, reconcile, reconcile_with};
pub use error::{ReconError, Result};
pub use input::{Loader, Parser, ParserConfig, SourceMetadata};
pub use report::{DetailSection, MetricValue, ReportModel, RunMetadata, SectionKind, build_report};
pub use value::{CellValue, MatchKey};
