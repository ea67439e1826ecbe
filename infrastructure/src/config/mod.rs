//! Configuration file loading for simbridge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./simbridge.toml` or `./.simbridge.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/simbridge/config.toml`
//! 4. Fallback: `~/.config/simbridge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_AXE_PATH, DEFAULT_TIMEOUT_SECONDS, DEFAULT_XCRUN_PATH,
    FileConfig, FileExecutablesConfig, FileGatewayConfig, FileLoggingConfig,
};
pub use loader::ConfigLoader;
