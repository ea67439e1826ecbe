//! Log destinations from TOML (`[logging]` section)
//!
//! Both entries are optional. Without `directory`, diagnostics go to stderr.
//! Without `audit_log`, invocations are not recorded.
//!
//! ```toml
//! [logging]
//! directory = "~/.local/state/simbridge"
//! audit_log = "audit.jsonl"   # relative to `directory`
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily-rotated diagnostic logs
    pub directory: Option<PathBuf>,
    /// JSONL invocation audit log
    pub audit_log: Option<PathBuf>,
}

impl FileLoggingConfig {
    pub fn log_directory(&self) -> Option<PathBuf> {
        self.directory.as_deref().map(expand_home)
    }

    /// Audit log path, with a relative path placed under `directory`.
    pub fn audit_log_path(&self) -> Option<PathBuf> {
        let audit = expand_home(self.audit_log.as_deref()?);
        match self.log_directory() {
            Some(dir) if audit.is_relative() => Some(dir.join(audit)),
            _ => Some(audit),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
