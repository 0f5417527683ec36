use std::path::PathBuf;

use anyhow::{Context, Result};

/// Base URL of the service under test when `API_BASE` is not set.
/// Matches the local Firebase emulator address the service ships with.
const DEFAULT_API_BASE: &str = "http://localhost:5001/resume-optimizer-app/us-central1/api";

/// Run configuration loaded from environment variables.
/// Every variable has a default, so a bare environment works out of the box.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the service under test. Endpoint paths are joined onto it.
    pub api_base: String,
    /// Directory that receives generated fixture files.
    pub output_dir: PathBuf,
    /// Upper bound on a single check's request, in seconds. A stalled call is
    /// reported as an errored check rather than hanging the run.
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base: std::env::var("API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            output_dir: std::env::var("TEST_DATA_DIR")
                .unwrap_or_else(|_| "test_data".to_string())
                .into(),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
