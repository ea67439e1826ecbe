//! Command Gateway port
//!
//! The single choke point through which any external process is started.
//! Adapters resolve the invocation's logical program through an allow-list
//! and run it without a shell.

use async_trait::async_trait;
use simbridge_domain::{CommandInvocation, CommandResult, SimulatorError};

/// Port for running allow-listed executables.
///
/// Contract for implementations:
///
/// - an unknown logical program yields [`SimulatorError::CommandNotAllowed`]
///   and nothing is spawned
/// - the argument vector is passed through as-is, never re-split or
///   interpreted by a shell
/// - a non-zero exit, spawn failure, timeout or oversized output yields
///   [`SimulatorError::CommandFailed`]
#[async_trait]
pub trait CommandGatewayPort: Send + Sync {
    async fn execute(&self, invocation: &CommandInvocation)
    -> Result<CommandResult, SimulatorError>;

    /// Run a program with a fixed, source-literal argument list.
    async fn execute_fixed(
        &self,
        program: &str,
        args: &[&'static str],
    ) -> Result<CommandResult, SimulatorError> {
        let invocation = CommandInvocation::new(program).literals(args);
        self.execute(&invocation).await
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod testing {
    //! Scripted gateway for exercising code above the port without
    //! starting processes.

    use super::*;
    use std::sync::Mutex;

    type Response = Result<CommandResult, SimulatorError>;

    struct Rule {
        program: String,
        prefix: Vec<String>,
        response: Response,
    }

    /// Records every invocation and answers from a list of prefix rules.
    ///
    /// The first rule whose program matches and whose argument prefix
    /// matches wins. Unmatched invocations succeed with empty output.
    #[derive(Default)]
    pub struct ScriptedCommandGateway {
        rules: Vec<Rule>,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ScriptedCommandGateway {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(mut self, program: &str, prefix: &[&str], response: Response) -> Self {
            self.rules.push(Rule {
                program: program.to_string(),
                prefix: prefix.iter().map(|s| s.to_string()).collect(),
                response,
            });
            self
        }

        /// Every recorded call as `(program, argv)`.
        pub fn calls(&self) -> Vec<(String, Vec<String>)> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        /// Calls made to `program` whose first argument is `subcommand`.
        pub fn calls_to(&self, program: &str, subcommand: &str) -> Vec<Vec<String>> {
            self.calls()
                .into_iter()
                .filter(|(p, argv)| p == program && argv.first().is_some_and(|a| a == subcommand))
                .map(|(_, argv)| argv)
                .collect()
        }
    }

    #[async_trait]
    impl CommandGatewayPort for ScriptedCommandGateway {
        async fn execute(&self, invocation: &CommandInvocation) -> Response {
            let argv = invocation.argv();
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((invocation.program().to_string(), argv.clone()));
            }

            self.rules
                .iter()
                .find(|rule| rule.program == invocation.program() && argv.starts_with(&rule.prefix))
                .map(|rule| rule.response.clone())
                .unwrap_or_else(|| Ok(CommandResult::text("")))
        }
    }
}
