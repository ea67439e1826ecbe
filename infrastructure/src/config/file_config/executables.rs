//! Executable paths from TOML (`[executables]` section)
//!
//! ```toml
//! [executables]
//! xcrun = "/usr/bin/xcrun"
//! axe = "/opt/homebrew/bin/axe"
//! ```

use crate::process::{AllowList, AllowListError};
use serde::{Deserialize, Serialize};
use simbridge_domain::{AXE, XCRUN};
use std::path::PathBuf;

pub const DEFAULT_XCRUN_PATH: &str = "/usr/bin/xcrun";
pub const DEFAULT_AXE_PATH: &str = "/opt/homebrew/bin/axe";

/// Raw executables configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutablesConfig {
    /// Absolute path of the device lifecycle tool
    pub xcrun: PathBuf,
    /// Absolute path of the UI automation tool
    pub axe: PathBuf,
}

impl Default for FileExecutablesConfig {
    fn default() -> Self {
        Self {
            xcrun: PathBuf::from(DEFAULT_XCRUN_PATH),
            axe: PathBuf::from(DEFAULT_AXE_PATH),
        }
    }
}

impl FileExecutablesConfig {
    /// Entries as `(logical name, path)` pairs.
    pub fn entries(&self) -> [(&'static str, &PathBuf); 2] {
        [(XCRUN, &self.xcrun), (AXE, &self.axe)]
    }

    /// Build the gateway allow-list from these paths.
    pub fn to_allow_list(&self) -> Result<AllowList, AllowListError> {
        self.entries()
            .into_iter()
            .try_fold(AllowList::new(), |list, (name, path)| {
                list.with_entry(name, path.clone())
            })
    }
}
