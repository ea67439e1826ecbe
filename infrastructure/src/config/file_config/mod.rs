//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and validated once at startup.

mod executables;
mod gateway;
mod logging;

pub use executables::{DEFAULT_AXE_PATH, DEFAULT_XCRUN_PATH, FileExecutablesConfig};
pub use gateway::{DEFAULT_TIMEOUT_SECONDS, FileGatewayConfig};
pub use logging::FileLoggingConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("executables.{name} must be an absolute path, got '{path}'")]
    RelativeExecutablePath { name: &'static str, path: String },

    #[error("gateway.max_output_bytes cannot be 0")]
    ZeroOutputLimit,

    #[error("gateway.timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Allow-listed executable paths
    pub executables: FileExecutablesConfig,
    /// Process limits
    pub gateway: FileGatewayConfig,
    /// Diagnostic and audit log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (name, path) in self.executables.entries() {
            if !path.is_absolute() {
                return Err(ConfigValidationError::RelativeExecutablePath {
                    name,
                    path: path.display().to_string(),
                });
            }
        }

        if self.gateway.max_output_bytes == 0 {
            return Err(ConfigValidationError::ZeroOutputLimit);
        }

        if self.gateway.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        Ok(())
    }
}
