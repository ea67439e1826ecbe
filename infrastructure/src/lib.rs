//! Infrastructure layer for simbridge
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the process-backed command gateway, the JSONL audit
//! log, configuration file loading, and the simulator tools.

pub mod config;
pub mod logging;
pub mod process;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileExecutablesConfig, FileGatewayConfig,
    FileLoggingConfig,
};
pub use logging::JsonlInvocationLogger;
pub use process::{AllowList, AllowListError, ExecutableStatus, ProcessCommandGateway};
pub use tools::{NO_ACTIVE_DEVICE_MESSAGE, ToolRegistry, default_registry};
