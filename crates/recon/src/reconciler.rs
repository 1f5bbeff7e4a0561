//! Main Reconciler struct and public API.

use std::path::Path;

use crate::config::{KeyConfig, ReconConfig};
use crate::dataset::Dataset;
use crate::engine::reconcile_with;
use crate::error::Result;
use crate::input::{Loader, SourceMetadata};
use crate::report::{ReportModel, RunInfo, RunMetadata, build_report};

/// A dataset together with the fingerprint of the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub dataset: Dataset,
    pub metadata: SourceMetadata,
}

impl From<(Dataset, SourceMetadata)> for LoadedSource {
    fn from((dataset, metadata): (Dataset, SourceMetadata)) -> Self {
        Self { dataset, metadata }
    }
}

/// Loads sources, reconciles them and builds the report.
///
/// Holds configuration only; every call is independent, so one instance can
/// be shared across threads.
pub struct Reconciler {
    config: ReconConfig,
    loader: Loader,
}

impl Reconciler {
    /// Create a new Reconciler with default configuration.
    pub fn new() -> Self {
        Self::with_config(ReconConfig::default())
    }

    /// Create a Reconciler with custom configuration.
    pub fn with_config(config: ReconConfig) -> Self {
        let loader = Loader::with_config(config.parser.clone());
        Self { config, loader }
    }

    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    /// Load a file from disk.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadedSource> {
        self.loader.load_file(path).map(LoadedSource::from)
    }

    /// Load an uploaded file; `name` selects the format and names the dataset.
    pub fn load_bytes(&self, name: &str, bytes: &[u8]) -> Result<LoadedSource> {
        self.loader.load_bytes(name, bytes).map(LoadedSource::from)
    }

    /// Reconcile two in-memory datasets. The report carries no run envelope.
    pub fn reconcile(&self, a: &Dataset, b: &Dataset, keys: &KeyConfig) -> Result<ReportModel> {
        let partition = reconcile_with(a, b, &keys.primary_key, &self.config)?;

        tracing::info!(
            primary_key = %keys.primary_key,
            dataset_a = %a.name,
            dataset_b = %b.name,
            matched = partition.matched.len(),
            a_only = partition.a_only.len(),
            b_only = partition.b_only.len(),
            "reconciled datasets"
        );

        let meta = RunMetadata::new(a.name.clone(), b.name.clone(), keys.clone());
        Ok(build_report(partition, &meta))
    }

    /// Reconcile two loaded sources and attach a run envelope with their
    /// fingerprints.
    pub fn reconcile_sources(
        &self,
        a: &LoadedSource,
        b: &LoadedSource,
        keys: &KeyConfig,
    ) -> Result<ReportModel> {
        let report = self.reconcile(&a.dataset, &b.dataset, keys)?;
        let run = RunInfo::new(vec![a.metadata.clone(), b.metadata.clone()]);
        tracing::debug!(run_id = %run.run_id, "attached run info");
        Ok(report.with_run_info(run))
    }

    /// Load two files from disk and reconcile them.
    pub fn reconcile_files(
        &self,
        path_a: impl AsRef<Path>,
        path_b: impl AsRef<Path>,
        keys: &KeyConfig,
    ) -> Result<ReportModel> {
        let a = self.load_file(path_a)?;
        let b = self.load_file(path_b)?;
        self.reconcile_sources(&a, &b, keys)
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
