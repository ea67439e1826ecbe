//! App launch tool: launch_app

use super::{failure, require_active_device};
use async_trait::async_trait;
use simbridge_application::DeviceOperations;
use simbridge_domain::validation::validate_identifier;
use simbridge_domain::{
    ParameterType, Tool, ToolArguments, ToolDescriptor, ToolParameter, ToolResponse,
};

/// Tool name constant
pub const LAUNCH_APP: &str = "launch_app";

const CONTEXT: &str = "Error launching app";

pub struct LaunchAppTool {
    ops: DeviceOperations,
    descriptor: ToolDescriptor,
}

impl LaunchAppTool {
    pub fn new(ops: DeviceOperations) -> Self {
        Self {
            ops,
            descriptor: ToolDescriptor::new(
                LAUNCH_APP,
                "Launch an installed app on the booted simulator by bundle identifier.",
            )
            .with_parameter(ToolParameter::new(
                "bundle_id",
                "Bundle identifier, e.g. com.apple.Preferences",
                true,
            ))
            .with_parameter(
                ToolParameter::new(
                    "terminate_running",
                    "Terminate the app first if it is already running (default: false)",
                    false,
                )
                .with_type(ParameterType::Boolean),
            ),
        }
    }
}

#[async_trait]
impl Tool for LaunchAppTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, args: &ToolArguments) -> ToolResponse {
        let bundle_id = match args
            .require_string("bundle_id")
            .and_then(|raw| validate_identifier(raw).map_err(|e| e.to_string()))
        {
            Ok(id) => id,
            Err(e) => return ToolResponse::error(CONTEXT, e),
        };
        let terminate_running = args.get_bool("terminate_running").unwrap_or(false);

        if let Err(response) = require_active_device(&self.ops, CONTEXT).await {
            return response;
        }

        match self.ops.launch_app(&bundle_id, terminate_running).await {
            Ok(message) => ToolResponse::text(message),
            Err(e) => failure(CONTEXT, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{UDID, booted, ops};
    use simbridge_domain::{CommandResult, XCRUN};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_launch_reports_tool_output() {
        let gateway = Arc::new(booted().on(
            XCRUN,
            &["simctl", "launch"],
            Ok(CommandResult::text("com.apple.Preferences: 4242\n")),
        ));
        let tool = LaunchAppTool::new(ops(&gateway));
        let args = ToolArguments::new().with_arg("bundle_id", "com.apple.Preferences");

        let response = tool.execute(&args).await;

        assert_eq!(response, ToolResponse::text("com.apple.Preferences: 4242"));
        let launches: Vec<_> = gateway
            .calls_to(XCRUN, "simctl")
            .into_iter()
            .filter(|argv| argv[1] == "launch")
            .collect();
        assert_eq!(
            launches,
            vec![vec!["simctl", "launch", UDID, "com.apple.Preferences"]]
        );
    }

    #[tokio::test]
    async fn test_invalid_bundle_id() {
        let gateway = Arc::new(booted());
        let tool = LaunchAppTool::new(ops(&gateway));
        let args = ToolArguments::new().with_arg("bundle_id", "com.example app; rm");

        let response = tool.execute(&args).await;

        assert!(!response.is_success());
        assert!(gateway.calls().is_empty());
    }
}
