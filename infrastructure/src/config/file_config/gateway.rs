//! Gateway limits from TOML (`[gateway]` section)

use serde::{Deserialize, Serialize};
use simbridge_domain::DEFAULT_MAX_OUTPUT_BYTES;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Raw gateway configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Ceiling for captured stdout/stderr, per stream
    pub max_output_bytes: usize,
    /// Wall-clock limit for a single invocation
    pub timeout_seconds: u64,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl FileGatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
