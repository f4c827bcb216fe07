use serde::{Deserialize, Serialize};

use crate::errors::RollupError;
use crate::RollupResult;

/// Environment variable the rollup node uses to hand the server address to a dapp.
pub const ROLLUP_SERVER_URL_ENV: &str = "ROLLUP_HTTP_SERVER_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollupConfig {
    /// Base address of the rollup HTTP server, e.g. `http://127.0.0.1:5004`
    pub server_url: String,
    /// Timeout for notice and report posts. `/finish` always waits for the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,
    /// Pause after a finish that returned no request. 0 means busy polling.
    #[serde(default)]
    pub idle_backoff_ms: u64,
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            request_timeout_seconds: None,
            idle_backoff_ms: 0,
        }
    }
}

impl RollupConfig {
    pub fn validate(&self) -> RollupResult<()> {
        if self.server_url.trim().is_empty() {
            return Err(RollupError::configuration(format!(
                "Rollup server URL is not set (use {ROLLUP_SERVER_URL_ENV} or rollup.server_url)"
            )));
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(RollupError::configuration(format!(
                "Rollup server URL must be http(s): {}",
                self.server_url
            )));
        }

        if self.request_timeout_seconds == Some(0) {
            return Err(RollupError::configuration(
                "Request timeout must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Full URL of one of the server endpoints (`finish`, `notice`, `report`).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.server_url.trim_end_matches('/'), path)
    }
}
