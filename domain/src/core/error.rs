//! Domain error types

use crate::validation::ValidationError;
use thiserror::Error;

/// Failures surfaced by the gateway and device operations.
///
/// None of these ever cross the dispatch boundary as-is: tools convert them
/// into an error [`ToolResponse`](crate::tool::ToolResponse).
#[derive(Error, Debug, Clone)]
pub enum SimulatorError {
    /// A caller value was rejected by a validator. Never retried.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The requested executable is not on the allow-list.
    #[error("Command not allowed: {0}")]
    CommandNotAllowed(String),

    /// The process could not be launched, exited non-zero, exceeded the
    /// output ceiling, or timed out.
    #[error("Command failed{}: {stderr}", status_suffix(.status))]
    CommandFailed { status: Option<i32>, stderr: String },

    /// Structured output from an external tool did not have the expected shape.
    #[error("Failed to parse command output: {0}")]
    ParseFailure(String),

    #[error("No booted simulator found")]
    NoActiveDevice,
}

fn status_suffix(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!(" (exit status {code})"),
        None => String::new(),
    }
}

impl SimulatorError {
    pub fn command_failed(status: Option<i32>, stderr: impl Into<String>) -> Self {
        SimulatorError::CommandFailed {
            status,
            stderr: stderr.into(),
        }
    }

    /// Stable machine-readable code, used in logs and the audit trail.
    pub fn code(&self) -> &'static str {
        match self {
            SimulatorError::InvalidInput(_) => "INVALID_INPUT",
            SimulatorError::CommandNotAllowed(_) => "COMMAND_NOT_ALLOWED",
            SimulatorError::CommandFailed { .. } => "COMMAND_FAILED",
            SimulatorError::ParseFailure(_) => "PARSE_FAILURE",
            SimulatorError::NoActiveDevice => "NO_ACTIVE_DEVICE",
        }
    }
}
