//! Executable allow-list.
//!
//! Maps each logical executable name to one absolute path. Paths are fixed
//! when the list is built and never looked up on `PATH`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllowListError {
    #[error("Executable name must not be empty")]
    EmptyName,

    #[error("Executable '{name}' must be an absolute path, got '{path}'")]
    NotAbsolute { name: String, path: String },
}

/// Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    entries: BTreeMap<String, PathBuf>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous path for `name`.
    pub fn with_entry(
        mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Result<Self, AllowListError> {
        let name = name.into();
        let path = path.into();

        if name.trim().is_empty() {
            return Err(AllowListError::EmptyName);
        }
        if !path.is_absolute() {
            return Err(AllowListError::NotAbsolute {
                name,
                path: path.display().to_string(),
            });
        }

        self.entries.insert(name, path);
        Ok(self)
    }

    /// Absolute path for a logical name, if allowed.
    pub fn resolve(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Filesystem status of every entry, in name order.
    pub fn inspect(&self) -> Vec<(String, PathBuf, ExecutableStatus)> {
        self.iter()
            .map(|(name, path)| {
                (
                    name.to_string(),
                    path.to_path_buf(),
                    ExecutableStatus::of(path),
                )
            })
            .collect()
    }
}

/// What is found at an allow-listed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutableStatus {
    Ready,
    Missing,
    NotExecutable,
}

impl ExecutableStatus {
    pub fn of(path: &Path) -> Self {
        let Ok(metadata) = std::fs::metadata(path) else {
            return ExecutableStatus::Missing;
        };
        if !metadata.is_file() {
            return ExecutableStatus::NotExecutable;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return ExecutableStatus::NotExecutable;
            }
        }

        ExecutableStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_relative_path() {
        let err = AllowList::new().with_entry("axe", "axe").unwrap_err();
        assert_eq!(
            err,
            AllowListError::NotAbsolute {
                name: "axe".to_string(),
                path: "axe".to_string()
            }
        );

        assert!(AllowList::new().with_entry("axe", "./bin/axe").is_err());
    }

    #[test]
    fn test_rejects_empty_name() {
        assert_eq!(
            AllowList::new().with_entry(" ", "/usr/bin/xcrun").unwrap_err(),
            AllowListError::EmptyName
        );
    }

    #[test]
    fn test_resolve() {
        let list = AllowList::new()
            .with_entry("xcrun", "/usr/bin/xcrun")
            .unwrap()
            .with_entry("axe", "/opt/homebrew/bin/axe")
            .unwrap();

        assert_eq!(list.resolve("xcrun"), Some(Path::new("/usr/bin/xcrun")));
        assert_eq!(list.resolve("sh"), None);
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            vec!["axe", "xcrun"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_inspect_reports_status() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain");
        std::fs::write(&plain, "not a program").unwrap();

        let list = AllowList::new()
            .with_entry("sh", "/bin/sh")
            .unwrap()
            .with_entry("plain", &plain)
            .unwrap()
            .with_entry("ghost", dir.path().join("ghost"))
            .unwrap();

        let status: Vec<_> = list.inspect().into_iter().map(|(n, _, s)| (n, s)).collect();
        assert_eq!(
            status,
            vec![
                ("ghost".to_string(), ExecutableStatus::Missing),
                ("plain".to_string(), ExecutableStatus::NotExecutable),
                ("sh".to_string(), ExecutableStatus::Ready),
            ]
        );
    }
}
