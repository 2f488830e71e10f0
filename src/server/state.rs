//! Server state and configuration.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::report::store::ReportStore;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Directory holding `static/` and `reports/`
    pub data_dir: PathBuf,
    /// Calendar year the recap covers
    pub report_year: i32,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub reports: ReportStore,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let reports = ReportStore::new(config.data_dir.join("reports"));
        Self {
            config,
            reports,
            boot_time,
        }
    }
}
