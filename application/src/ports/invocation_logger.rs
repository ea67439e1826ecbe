//! Port for the invocation audit trail.
//!
//! Every process the gateway starts (or refuses to start) is recorded as one
//! [`InvocationEvent`]. This is separate from `tracing`-based operation
//! logs: tracing carries human-readable diagnostics, while this port keeps a
//! machine-readable record of what was executed (JSONL).

use serde_json::{Value, json};
use simbridge_domain::{CommandInvocation, InvocationArg, ValidatedArgument};

/// One audited gateway invocation.
pub struct InvocationEvent {
    /// Outcome identifier ("ok", or the error's stable code).
    pub outcome: &'static str,
    /// JSON payload with invocation details.
    pub payload: Value,
}

impl InvocationEvent {
    /// Build an event for `invocation`.
    ///
    /// Free text is recorded by length only; every other argument is
    /// recorded as rendered.
    pub fn new(
        invocation: &CommandInvocation,
        outcome: &'static str,
        status: Option<i32>,
        duration_ms: u128,
    ) -> Self {
        let args: Vec<Value> = invocation
            .args()
            .iter()
            .map(|arg| match arg {
                InvocationArg::Validated(value @ ValidatedArgument::FreeText(text)) => {
                    json!({ "redacted": value.kind(), "chars": text.char_count() })
                }
                other => Value::String(other.render()),
            })
            .collect();

        Self {
            outcome,
            payload: json!({
                "program": invocation.program(),
                "args": args,
                "status": status,
                "duration_ms": duration_ms,
            }),
        }
    }
}

/// Port for recording gateway invocations.
///
/// The `log` method is synchronous and non-fallible; a failed write must
/// never fail the invocation it describes.
pub trait InvocationLogger: Send + Sync {
    fn log(&self, event: InvocationEvent);
}

/// No-op implementation for tests and when the audit log is disabled.
pub struct NoInvocationLogger;

impl InvocationLogger for NoInvocationLogger {
    fn log(&self, _event: InvocationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use simbridge_domain::validation::validate_free_text;

    #[test]
    fn test_free_text_is_redacted() {
        let text = validate_free_text("hunter2 is my password").unwrap();
        let invocation = simbridge_domain::CommandInvocation::new("axe")
            .literal("type")
            .value(text);

        let event = InvocationEvent::new(&invocation, "ok", Some(0), 12);
        let rendered = event.payload.to_string();

        assert!(!rendered.contains("hunter2"));
        assert_eq!(event.payload["args"][0], "type");
        assert_eq!(event.payload["args"][1]["redacted"], "free_text");
        assert_eq!(event.payload["args"][1]["chars"], 22);
        assert_eq!(event.payload["status"], 0);
    }
}
