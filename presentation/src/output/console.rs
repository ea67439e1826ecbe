//! Console output for the `check` command and startup summaries

use colored::Colorize;
use simbridge_infrastructure::{ExecutableStatus, FileConfig};
use std::path::PathBuf;

/// Formats diagnostics for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render the allow-list status table.
    ///
    /// Entries are `(name, path, status)` as reported by
    /// [`AllowList::inspect`](simbridge_infrastructure::AllowList::inspect).
    pub fn check_report(entries: &[(String, PathBuf, ExecutableStatus)]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("simbridge check"));
        output.push('\n');
        output.push_str(&Self::section_header("Executables"));

        for (name, path, status) in entries {
            let marker = match status {
                ExecutableStatus::Ready => "[ OK ]".green().bold(),
                ExecutableStatus::Missing => "[MISS]".red().bold(),
                ExecutableStatus::NotExecutable => "[PERM]".yellow().bold(),
            };
            output.push_str(&format!(
                "  {} {:<6} {}",
                marker,
                name.cyan(),
                path.display()
            ));
            match status {
                ExecutableStatus::Ready => {}
                ExecutableStatus::Missing => output.push_str(&format!(" {}", "(not found)".dimmed())),
                ExecutableStatus::NotExecutable => {
                    output.push_str(&format!(" {}", "(not executable)".dimmed()))
                }
            }
            output.push('\n');
        }

        let ready = entries
            .iter()
            .filter(|(_, _, s)| *s == ExecutableStatus::Ready)
            .count();
        let summary = format!("{}/{} executables ready", ready, entries.len());
        output.push('\n');
        if ready == entries.len() {
            output.push_str(&summary.green().to_string());
        } else {
            output.push_str(&summary.red().to_string());
        }
        output.push_str(&Self::footer());

        output
    }

    /// Summarize the effective gateway settings
    pub fn config_summary(config: &FileConfig) -> String {
        let mut output = Self::section_header("Gateway");
        output.push_str(&format!(
            "  {} {} bytes\n",
            "max output:".dimmed(),
            config.gateway.max_output_bytes
        ));
        output.push_str(&format!(
            "  {} {}s\n",
            "timeout:".dimmed(),
            config.gateway.timeout_seconds
        ));
        if let Some(path) = config.logging.audit_log_path() {
            output.push_str(&format!("  {} {}\n", "audit log:".dimmed(), path.display()));
        }
        output
    }

    /// Whether every entry is ready to launch
    pub fn all_ready(entries: &[(String, PathBuf, ExecutableStatus)]) -> bool {
        entries.iter().all(|(_, _, s)| *s == ExecutableStatus::Ready)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<(String, PathBuf, ExecutableStatus)> {
        vec![
            (
                "axe".to_string(),
                PathBuf::from("/opt/homebrew/bin/axe"),
                ExecutableStatus::Missing,
            ),
            (
                "xcrun".to_string(),
                PathBuf::from("/usr/bin/xcrun"),
                ExecutableStatus::Ready,
            ),
        ]
    }

    #[test]
    fn test_check_report_lists_every_entry() {
        colored::control::set_override(false);
        let report = ConsoleFormatter::check_report(&entries());

        assert!(report.contains("[MISS] axe    /opt/homebrew/bin/axe (not found)"));
        assert!(report.contains("[ OK ] xcrun  /usr/bin/xcrun"));
        assert!(report.contains("1/2 executables ready"));
    }

    #[test]
    fn test_all_ready() {
        assert!(!ConsoleFormatter::all_ready(&entries()));
        assert!(ConsoleFormatter::all_ready(&entries()[1..]));
    }

    #[test]
    fn test_config_summary_mentions_limits() {
        colored::control::set_override(false);
        let summary = ConsoleFormatter::config_summary(&FileConfig::default());
        assert!(summary.contains("10485760 bytes"));
        assert!(summary.contains("120s"));
    }
}
