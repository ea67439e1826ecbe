//! Process-backed command gateway.
//!
//! Resolves the logical program through the [`AllowList`], then runs the
//! absolute path directly with the invocation's argv. No shell is involved,
//! stdin is closed, and stdout/stderr are captured up to a byte ceiling.

use super::allow_list::AllowList;
use async_trait::async_trait;
use simbridge_application::ports::command_gateway::CommandGatewayPort;
use simbridge_application::ports::invocation_logger::{
    InvocationEvent, InvocationLogger, NoInvocationLogger,
};
use simbridge_domain::{
    CommandInvocation, CommandOutput, CommandResult, DEFAULT_MAX_OUTPUT_BYTES, OutputMode,
    SimulatorError, truncate,
};
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

/// Why capturing a child's output stopped early.
enum CaptureError {
    Overflow(&'static str),
    TimedOut(Duration),
    Io(std::io::Error),
}

impl CaptureError {
    fn into_simulator_error(self, limit: usize) -> SimulatorError {
        match self {
            CaptureError::Overflow(stream) => SimulatorError::command_failed(
                None,
                format!("{stream} exceeded the {limit} byte output limit"),
            ),
            CaptureError::TimedOut(after) => SimulatorError::command_failed(
                None,
                format!("timed out after {:.1}s", after.as_secs_f64()),
            ),
            CaptureError::Io(e) => {
                SimulatorError::command_failed(None, format!("failed to read output: {e}"))
            }
        }
    }
}

/// Read at most `limit` bytes. Reading one byte past the limit is an overflow.
async fn read_capped<R>(
    reader: R,
    limit: usize,
    stream: &'static str,
) -> Result<Vec<u8>, CaptureError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .await
        .map_err(CaptureError::Io)?;

    if buf.len() > limit {
        return Err(CaptureError::Overflow(stream));
    }
    Ok(buf)
}

/// [`CommandGatewayPort`] adapter backed by `tokio::process`.
pub struct ProcessCommandGateway {
    allow_list: AllowList,
    max_output_bytes: usize,
    timeout: Option<Duration>,
    audit: Arc<dyn InvocationLogger>,
}

impl ProcessCommandGateway {
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            timeout: None,
            audit: Arc::new(NoInvocationLogger),
        }
    }

    pub fn with_max_output_bytes(mut self, limit: usize) -> Self {
        self.max_output_bytes = limit;
        self
    }

    /// Wall-clock limit per invocation. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_invocation_logger(mut self, logger: Arc<dyn InvocationLogger>) -> Self {
        self.audit = logger;
        self
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    fn effective_limit(&self, invocation: &CommandInvocation) -> usize {
        match invocation.options().max_output_bytes {
            Some(requested) => requested.min(self.max_output_bytes),
            None => self.max_output_bytes,
        }
    }

    async fn run(
        &self,
        path: &Path,
        invocation: &CommandInvocation,
    ) -> Result<CommandResult, SimulatorError> {
        let limit = self.effective_limit(invocation);

        let mut cmd = Command::new(path);
        cmd.args(invocation.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        for (key, value) in &invocation.options().env {
            cmd.env(key, value);
        }

        // Linux: request kernel to send SIGTERM to child when parent dies.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        let mut child = cmd.spawn().map_err(|e| {
            SimulatorError::command_failed(
                None,
                format!("failed to start {}: {}", path.display(), e),
            )
        })?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            let _ = child.kill().await;
            return Err(SimulatorError::command_failed(
                None,
                "child output was not captured",
            ));
        };

        let capture = async {
            let (out, err) = tokio::try_join!(
                read_capped(stdout, limit, "stdout"),
                read_capped(stderr, limit, "stderr"),
            )?;
            let status = child.wait().await.map_err(CaptureError::Io)?;
            Ok::<_, CaptureError>((status, out, err))
        };

        let captured = match self.timeout {
            Some(after) => match tokio::time::timeout(after, capture).await {
                Ok(result) => result,
                Err(_) => Err(CaptureError::TimedOut(after)),
            },
            None => capture.await,
        };

        let (status, out, err) = match captured {
            Ok(captured) => captured,
            Err(e) => {
                let _ = child.kill().await;
                return Err(e.into_simulator_error(limit));
            }
        };

        let stderr = String::from_utf8_lossy(&err).trim().to_string();
        if !status.success() {
            let detail = if stderr.is_empty() {
                String::from_utf8_lossy(&out).trim().to_string()
            } else {
                stderr
            };
            return Err(SimulatorError::command_failed(status.code(), detail));
        }

        let stdout = match invocation.options().output {
            OutputMode::Binary => CommandOutput::Binary(out),
            OutputMode::Text => CommandOutput::Text(String::from_utf8_lossy(&out).into_owned()),
        };

        Ok(CommandResult {
            status: status.code().unwrap_or(0),
            stdout,
            stderr,
        })
    }
}

#[async_trait]
impl CommandGatewayPort for ProcessCommandGateway {
    async fn execute(
        &self,
        invocation: &CommandInvocation,
    ) -> Result<CommandResult, SimulatorError> {
        let started = Instant::now();

        let result = match self.allow_list.resolve(invocation.program()) {
            Some(path) => {
                debug!(
                    "Executing {} ({} args)",
                    path.display(),
                    invocation.args().len()
                );
                self.run(path, invocation).await
            }
            None => {
                warn!("Refused to run '{}': not allow-listed", invocation.program());
                Err(SimulatorError::CommandNotAllowed(
                    invocation.program().to_string(),
                ))
            }
        };

        let elapsed = started.elapsed().as_millis();
        let (outcome, status) = match &result {
            Ok(r) => ("ok", Some(r.status)),
            Err(SimulatorError::CommandFailed { status, .. }) => ("COMMAND_FAILED", *status),
            Err(e) => (e.code(), None),
        };
        if let Err(e) = &result {
            debug!(
                "{} failed after {}ms: {}",
                invocation.program(),
                elapsed,
                truncate(&e.to_string(), 200)
            );
        }
        self.audit
            .log(InvocationEvent::new(invocation, outcome, status, elapsed));

        result
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use simbridge_domain::validation::validate_label;
    use std::sync::Mutex;

    fn shell_gateway() -> ProcessCommandGateway {
        let allow_list = AllowList::new()
            .with_entry("sh", "/bin/sh")
            .unwrap()
            .with_entry("echo", "/bin/echo")
            .unwrap();
        ProcessCommandGateway::new(allow_list)
    }

    fn sh(script: &'static str) -> CommandInvocation {
        CommandInvocation::new("sh").literals(&["-c", script])
    }

    #[derive(Default)]
    struct RecordingLogger {
        outcomes: Mutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl InvocationLogger for RecordingLogger {
        fn log(&self, event: InvocationEvent) {
            self.outcomes
                .lock()
                .unwrap()
                .push((event.outcome, event.payload));
        }
    }

    #[tokio::test]
    async fn test_unknown_program_is_not_allowed() {
        let gateway = shell_gateway();
        let invocation = CommandInvocation::new("rm").literals(&["-rf", "/"]);

        let err = gateway.execute(&invocation).await.unwrap_err();
        assert!(matches!(err, SimulatorError::CommandNotAllowed(name) if name == "rm"));
    }

    #[tokio::test]
    async fn test_unknown_program_is_never_spawned() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("touched");
        let logger = Arc::new(RecordingLogger::default());
        let gateway = shell_gateway().with_invocation_logger(logger.clone());

        // `touch` is on PATH but not allow-listed
        let path = validate_label(marker.to_str().unwrap()).unwrap();
        let err = gateway
            .execute(&CommandInvocation::new("touch").value(path))
            .await
            .unwrap_err();

        assert!(matches!(err, SimulatorError::CommandNotAllowed(_)));
        assert!(!marker.exists());

        let outcomes = logger.outcomes.lock().unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].0, "COMMAND_NOT_ALLOWED");
        assert!(outcomes[0].1["status"].is_null());
        assert_eq!(outcomes[0].1["program"], "touch");
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let gateway = shell_gateway();
        let invocation = CommandInvocation::new("echo").literal("hello");

        let result = gateway.execute(&invocation).await.unwrap();
        assert_eq!(result.status, 0);
        assert_eq!(result.stdout.text(), "hello\n");
    }

    #[tokio::test]
    async fn test_arguments_are_not_shell_interpreted() {
        let gateway = shell_gateway();
        let invocation = CommandInvocation::new("echo").literals(&["$(whoami)", ";", "ls"]);

        let result = gateway.execute(&invocation).await.unwrap();
        assert_eq!(result.stdout.text(), "$(whoami) ; ls\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_reports_stderr() {
        let gateway = shell_gateway();

        let err = gateway
            .execute(&sh("echo boom >&2; exit 3"))
            .await
            .unwrap_err();

        match err {
            SimulatorError::CommandFailed { status, stderr } => {
                assert_eq!(status, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_output_over_limit_fails() {
        let gateway = shell_gateway().with_max_output_bytes(1000);

        let err = gateway
            .execute(&sh("head -c 2000 /dev/zero"))
            .await
            .unwrap_err();

        assert!(matches!(err, SimulatorError::CommandFailed { .. }));
        assert!(err.to_string().contains("1000 byte output limit"));
    }

    #[tokio::test]
    async fn test_output_at_limit_succeeds() {
        let gateway = shell_gateway().with_max_output_bytes(1000);

        let result = gateway
            .execute(&sh("head -c 1000 /dev/zero").binary_output())
            .await
            .unwrap();
        assert_eq!(result.stdout.len(), 1000);
    }

    #[tokio::test]
    async fn test_endless_output_is_cut_off() {
        let gateway = shell_gateway().with_max_output_bytes(4096);

        let err = gateway
            .execute(&sh("while :; do echo y; done"))
            .await
            .unwrap_err();
        assert!(matches!(err, SimulatorError::CommandFailed { status: None, .. }));
    }

    #[tokio::test]
    async fn test_per_invocation_limit_is_capped_by_gateway() {
        let gateway = shell_gateway().with_max_output_bytes(100);
        let invocation = sh("head -c 500 /dev/zero").with_max_output_bytes(10_000);

        assert!(gateway.execute(&invocation).await.is_err());
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let gateway = shell_gateway().with_timeout(Some(Duration::from_millis(200)));

        let started = Instant::now();
        let err = gateway.execute(&sh("sleep 5")).await.unwrap_err();

        assert!(err.to_string().contains("timed out"));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_binary_output_is_preserved() {
        let gateway = shell_gateway();

        let result = gateway
            .execute(&sh("printf '\\211PNG\\377'").binary_output())
            .await
            .unwrap();

        assert_eq!(
            result.stdout,
            CommandOutput::Binary(vec![0x89, b'P', b'N', b'G', 0xFF])
        );
    }

    #[tokio::test]
    async fn test_missing_executable_fails_to_start() {
        let allow_list = AllowList::new()
            .with_entry("axe", "/nonexistent/bin/axe")
            .unwrap();
        let gateway = ProcessCommandGateway::new(allow_list);

        let err = gateway
            .execute(&CommandInvocation::new("axe").literal("describe-ui"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to start /nonexistent/bin/axe"));
    }

    #[tokio::test]
    async fn test_every_invocation_is_audited() {
        let logger = Arc::new(RecordingLogger::default());
        let gateway = shell_gateway().with_invocation_logger(logger.clone());

        let _ = gateway
            .execute(&CommandInvocation::new("echo").literal("hi"))
            .await;
        let _ = gateway.execute(&CommandInvocation::new("curl")).await;
        let _ = gateway.execute(&sh("exit 4")).await;

        let outcomes = logger.outcomes.lock().unwrap();
        let codes: Vec<_> = outcomes.iter().map(|(o, _)| *o).collect();
        assert_eq!(codes, vec!["ok", "COMMAND_NOT_ALLOWED", "COMMAND_FAILED"]);
        assert_eq!(outcomes[0].1["args"], serde_json::json!(["hi"]));
        assert_eq!(outcomes[2].1["status"], 4);
    }
}
