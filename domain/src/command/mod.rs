//! Process invocation values.
//!
//! A [`CommandInvocation`] names a *logical* executable (resolved to a path
//! by the gateway's allow-list) and an ordered argument vector. Arguments
//! are either `&'static str` literals written in source (subcommands and
//! flags) or [`ValidatedArgument`]s, so a raw caller string has no way in.
//!
//! ```text
//! CommandInvocation::new(AXE)
//!     .literal("tap")
//!     .literal("-x").value(&x)          // x: Coordinate
//!     .literal("--udid").value(&udid)   // udid: DeviceUdid
//! ```

use crate::validation::ValidatedArgument;

/// Logical name of the device lifecycle tool (`xcrun simctl ...`).
pub const XCRUN: &str = "xcrun";
/// Logical name of the UI automation tool.
pub const AXE: &str = "axe";

/// Default ceiling for captured stdout/stderr (10 MiB).
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// How stdout should be captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Decode as UTF-8 (lossy).
    #[default]
    Text,
    /// Keep raw bytes (images).
    Binary,
}

/// Per-invocation execution options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    pub output: OutputMode,
    /// Per-invocation override of the gateway's output ceiling. The gateway
    /// uses the smaller of this and its own limit.
    pub max_output_bytes: Option<usize>,
    /// Extra environment variables. Values are fixed by the caller's code.
    pub env: Vec<(&'static str, &'static str)>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            output: OutputMode::Text,
            max_output_bytes: None,
            env: Vec::new(),
        }
    }
}

/// One argument, remembering where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationArg {
    Literal(&'static str),
    Validated(ValidatedArgument),
}

impl InvocationArg {
    pub fn render(&self) -> String {
        match self {
            InvocationArg::Literal(s) => (*s).to_string(),
            InvocationArg::Validated(v) => v.render(),
        }
    }
}

/// A request to run one allow-listed executable.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInvocation {
    program: String,
    args: Vec<InvocationArg>,
    options: ExecutionOptions,
}

impl CommandInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            options: ExecutionOptions::default(),
        }
    }

    /// Append a fixed argument written in source.
    pub fn literal(mut self, arg: &'static str) -> Self {
        self.args.push(InvocationArg::Literal(arg));
        self
    }

    /// Append several fixed arguments.
    pub fn literals(mut self, args: &[&'static str]) -> Self {
        self.args
            .extend(args.iter().copied().map(InvocationArg::Literal));
        self
    }

    /// Append a validated caller value.
    pub fn value(mut self, arg: impl Into<ValidatedArgument>) -> Self {
        self.args.push(InvocationArg::Validated(arg.into()));
        self
    }

    /// Append `flag value` when `value` is present.
    pub fn optional<V: Into<ValidatedArgument>>(self, flag: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.literal(flag).value(v),
            None => self,
        }
    }

    pub fn binary_output(mut self) -> Self {
        self.options.output = OutputMode::Binary;
        self
    }

    pub fn with_max_output_bytes(mut self, limit: usize) -> Self {
        self.options.max_output_bytes = Some(limit);
        self
    }

    pub fn with_env(mut self, key: &'static str, value: &'static str) -> Self {
        self.options.env.push((key, value));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[InvocationArg] {
        &self.args
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// The exact argument vector handed to the process.
    pub fn argv(&self) -> Vec<String> {
        self.args.iter().map(InvocationArg::render).collect()
    }
}

/// Captured standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Text(String),
    Binary(Vec<u8>),
}

impl CommandOutput {
    /// Text view of the output (binary output is decoded lossily).
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            CommandOutput::Text(s) => std::borrow::Cow::Borrowed(s),
            CommandOutput::Binary(b) => String::from_utf8_lossy(b),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            CommandOutput::Text(s) => s.into_bytes(),
            CommandOutput::Binary(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CommandOutput::Text(s) => s.len(),
            CommandOutput::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of a successful invocation.
///
/// The gateway only hands out a `CommandResult` for a zero exit status;
/// every other outcome is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: i32,
    pub stdout: CommandOutput,
    pub stderr: String,
}

impl CommandResult {
    pub fn text(stdout: impl Into<String>) -> Self {
        Self {
            status: 0,
            stdout: CommandOutput::Text(stdout.into()),
            stderr: String::new(),
        }
    }

    pub fn binary(stdout: Vec<u8>) -> Self {
        Self {
            status: 0,
            stdout: CommandOutput::Binary(stdout),
            stderr: String::new(),
        }
    }
}
