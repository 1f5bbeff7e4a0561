//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::input::ParserConfig;

/// Suffix appended to dataset A's copy of a shared non-key column.
pub const DEFAULT_SUFFIX_A: &str = "_A";
/// Suffix appended to dataset B's copy of a shared non-key column.
pub const DEFAULT_SUFFIX_B: &str = "_B";

/// Configuration for a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconConfig {
    /// Delimited-text loader configuration.
    pub parser: ParserConfig,
    /// Suffix for A's side of a column name present in both datasets.
    pub suffix_a: String,
    /// Suffix for B's side of a column name present in both datasets.
    pub suffix_b: String,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            suffix_a: DEFAULT_SUFFIX_A.to_string(),
            suffix_b: DEFAULT_SUFFIX_B.to_string(),
        }
    }
}

impl ReconConfig {
    pub fn with_suffixes(mut self, suffix_a: impl Into<String>, suffix_b: impl Into<String>) -> Self {
        self.suffix_a = suffix_a.into();
        self.suffix_b = suffix_b.into();
        self
    }

    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }
}

/// Which column to match on, plus columns recorded for reference only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConfig {
    pub primary_key: String,
    /// Informational; never used for matching.
    #[serde(default)]
    pub secondary_keys: Vec<String>,
}

impl KeyConfig {
    pub fn new(primary_key: impl Into<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            secondary_keys: Vec::new(),
        }
    }

    pub fn with_secondary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secondary_keys = keys.into_iter().map(Into::into).collect();
        self
    }
}
