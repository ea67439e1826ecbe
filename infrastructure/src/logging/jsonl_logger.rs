//! JSONL file writer for gateway invocations.
//!
//! Each [`InvocationEvent`] is serialized as a single JSON line with an
//! `outcome` field and `timestamp`, appended through a buffered writer.

use simbridge_application::ports::invocation_logger::{InvocationEvent, InvocationLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Audit logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlInvocationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlInvocationLogger {
    /// Open (or create) the audit log at `path` for appending.
    ///
    /// Creates parent directories as needed. Returns `None` if the file
    /// cannot be opened; the server then runs without an audit log.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open audit log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InvocationLogger for JsonlInvocationLogger {
    fn log(&self, event: InvocationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = match event.payload {
            serde_json::Value::Object(mut map) => {
                map.insert("outcome".to_string(), event.outcome.into());
                map.insert("timestamp".to_string(), timestamp.into());
                serde_json::Value::Object(map)
            }
            other => serde_json::json!({
                "outcome": event.outcome,
                "timestamp": timestamp,
                "data": other,
            }),
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlInvocationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simbridge_domain::CommandInvocation;
    use simbridge_domain::validation::{validate_device_id, validate_free_text};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlInvocationLogger::new(&path).unwrap();

        let udid = validate_device_id("a1b2c3d4-e5f6-4a1b-8c9d-0123456789ab").unwrap();
        let describe = CommandInvocation::new("axe")
            .literals(&["describe-ui", "--udid"])
            .value(udid);
        logger.log(InvocationEvent::new(&describe, "ok", Some(0), 41));

        let typed = CommandInvocation::new("axe")
            .literal("type")
            .value(validate_free_text("secret").unwrap());
        logger.log(InvocationEvent::new(&typed, "COMMAND_FAILED", Some(1), 7));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0]["outcome"], "ok");
        assert_eq!(records[0]["program"], "axe");
        assert_eq!(records[0]["args"][2], "A1B2C3D4-E5F6-4A1B-8C9D-0123456789AB");
        assert!(records[0]["timestamp"].is_string());

        assert_eq!(records[1]["outcome"], "COMMAND_FAILED");
        assert_eq!(records[1]["args"][1]["chars"], 6);
        assert!(!records[1].to_string().contains("secret"));
    }

    #[test]
    fn test_appends_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("audit.jsonl");
        let invocation = CommandInvocation::new("xcrun").literals(&["simctl", "list", "devices"]);

        for _ in 0..2 {
            let logger = JsonlInvocationLogger::new(&path).unwrap();
            logger.log(InvocationEvent::new(&invocation, "ok", Some(0), 3));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlInvocationLogger::new(&path).unwrap();

        logger.log(InvocationEvent {
            outcome: "ok",
            payload: serde_json::json!("bare"),
        });
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["data"], "bare");
        assert_eq!(records[0]["outcome"], "ok");
    }
}
