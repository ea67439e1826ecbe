//! Device listing tool: list_devices

use super::failure;
use async_trait::async_trait;
use serde_json::json;
use simbridge_application::DeviceOperations;
use simbridge_domain::device::project_devices;
use simbridge_domain::{
    ParameterType, Tool, ToolArguments, ToolDescriptor, ToolParameter, ToolResponse,
};

/// Tool name constant
pub const LIST_DEVICES: &str = "list_devices";

const CONTEXT: &str = "Error listing devices";

pub struct ListDevicesTool {
    ops: DeviceOperations,
    descriptor: ToolDescriptor,
}

impl ListDevicesTool {
    pub fn new(ops: DeviceOperations) -> Self {
        Self {
            ops,
            descriptor: ToolDescriptor::new(
                LIST_DEVICES,
                "List iOS simulators with their UDID, state and runtime version.",
            )
            .with_parameter(
                ToolParameter::new(
                    "available_only",
                    "Only include simulators whose runtime is installed (default: false)",
                    false,
                )
                .with_type(ParameterType::Boolean),
            ),
        }
    }
}

#[async_trait]
impl Tool for ListDevicesTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, args: &ToolArguments) -> ToolResponse {
        let available_only = args.get_bool("available_only").unwrap_or(false);

        let devices = match self.ops.enumerate_devices().await {
            Ok(payload) => match project_devices(&payload, available_only) {
                Ok(devices) => devices,
                Err(e) => return failure(CONTEXT, e),
            },
            Err(e) => return failure(CONTEXT, e),
        };

        let body = json!({ "count": devices.len(), "devices": devices });
        match serde_json::to_string_pretty(&body) {
            Ok(text) => ToolResponse::text(text),
            Err(e) => ToolResponse::error(CONTEXT, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simbridge_application::ports::command_gateway::testing::ScriptedCommandGateway;
    use simbridge_domain::{CommandResult, XCRUN};
    use std::sync::Arc;

    const PAYLOAD: &str = r#"{
        "devices": {
            "com.apple.CoreSimulator.SimRuntime.iOS-17-0": [
                {"name": "iPhone 15 Pro", "udid": "A1B2C3D4-E5F6-4A1B-8C9D-0123456789AB",
                 "state": "Booted", "isAvailable": true}
            ],
            "com.apple.CoreSimulator.SimRuntime.iOS-16-4": [
                {"name": "iPhone 14", "udid": "11111111-2222-3333-4444-555555555555",
                 "state": "Shutdown", "isAvailable": false}
            ]
        }
    }"#;

    fn tool(stdout: &str) -> ListDevicesTool {
        let gateway = ScriptedCommandGateway::new().on(
            XCRUN,
            &["simctl", "list", "devices", "--json"],
            Ok(CommandResult::text(stdout)),
        );
        ListDevicesTool::new(DeviceOperations::new(Arc::new(gateway)))
    }

    fn parse(response: &ToolResponse) -> serde_json::Value {
        serde_json::from_str(response.first_text().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_lists_all_devices() {
        let response = tool(PAYLOAD).execute(&ToolArguments::new()).await;

        assert!(response.is_success());
        let body = parse(&response);
        assert_eq!(body["count"], 2);
        // Runtimes are visited in key order
        assert_eq!(body["devices"][0]["platform_version"], "iOS 16.4");
        assert_eq!(body["devices"][1]["state"], "Booted");
        assert_eq!(body["devices"][1]["platform_version"], "iOS 17.0");
    }

    #[tokio::test]
    async fn test_available_only() {
        let args = ToolArguments::new().with_arg("available_only", true);
        let response = tool(PAYLOAD).execute(&args).await;

        let body = parse(&response);
        assert_eq!(body["count"], 1);
        assert_eq!(body["devices"][0]["name"], "iPhone 15 Pro");
    }

    #[tokio::test]
    async fn test_unexpected_payload_is_parse_failure() {
        let response = tool(r#"{"runtimes": []}"#).execute(&ToolArguments::new()).await;

        assert!(!response.is_success());
        assert!(
            response
                .first_text()
                .unwrap()
                .starts_with("Error listing devices: Failed to parse command output")
        );
    }
}
