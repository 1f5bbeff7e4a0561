//! Application state for the web server.

use std::sync::Arc;

use recon::Reconciler;

/// Column names offered in the upload form before any file is chosen.
pub const SAMPLE_COLUMNS: [&str; 4] = ["TransactionID", "Date", "Amount", "Description"];

/// Server settings resolved from the command line and environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a request body, both files included.
    pub max_upload_bytes: usize,
    pub sample_columns: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: 50 * 1024 * 1024,
            sample_columns: SAMPLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Shared application state.
///
/// Requests share nothing mutable; each reconciliation runs on its own inputs.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub reconciler: Arc<Reconciler>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            reconciler: Arc::new(Reconciler::new()),
        }
    }
}
