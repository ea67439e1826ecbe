//! Tap tool: tap by coordinates, accessibility identifier, or label

use super::{failure, require_active_device};
use async_trait::async_trait;
use simbridge_application::DeviceOperations;
use simbridge_domain::{
    ParameterType, TapSpec, Tool, ToolArguments, ToolDescriptor, ToolParameter, ToolResponse,
};

/// Tool name constant
pub const TAP: &str = "tap";

const CONTEXT: &str = "Error tapping";

pub struct TapTool {
    ops: DeviceOperations,
    descriptor: ToolDescriptor,
}

impl TapTool {
    pub fn new(ops: DeviceOperations) -> Self {
        Self {
            ops,
            descriptor: ToolDescriptor::new(
                TAP,
                "Tap the booted simulator. Provide exactly one of: x and y (points), \
                 identifier (accessibility identifier), or label (accessibility label).",
            )
            .with_parameter(
                ToolParameter::new("x", "X coordinate in points", false)
                    .with_type(ParameterType::Number),
            )
            .with_parameter(
                ToolParameter::new("y", "Y coordinate in points", false)
                    .with_type(ParameterType::Number),
            )
            .with_parameter(ToolParameter::new(
                "identifier",
                "Accessibility identifier of the element to tap",
                false,
            ))
            .with_parameter(ToolParameter::new(
                "label",
                "Accessibility label of the element to tap",
                false,
            )),
        }
    }
}

#[async_trait]
impl Tool for TapTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, args: &ToolArguments) -> ToolResponse {
        let spec = match TapSpec::from_raw(
            args.get("x"),
            args.get("y"),
            args.get_string("identifier"),
            args.get_string("label"),
        ) {
            Ok(spec) => spec,
            Err(e) => return ToolResponse::error(CONTEXT, e),
        };

        if let Err(response) = require_active_device(&self.ops, CONTEXT).await {
            return response;
        }

        match self.ops.tap(&spec).await {
            Ok(message) => ToolResponse::text(message),
            Err(e) => failure(CONTEXT, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{UDID, booted, idle, ops};
    use simbridge_domain::AXE;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_tap_by_coordinates() {
        let gateway = Arc::new(booted());
        let tool = TapTool::new(ops(&gateway));
        let args = ToolArguments::new().with_arg("x", 120).with_arg("y", "640.5");

        let response = tool.execute(&args).await;

        assert_eq!(response, ToolResponse::text("Tap completed"));
        assert_eq!(
            gateway.calls_to(AXE, "tap"),
            vec![vec!["tap", "-x", "120", "-y", "640.5", "--udid", UDID]]
        );
    }

    #[tokio::test]
    async fn test_tap_by_identifier() {
        let gateway = Arc::new(booted());
        let tool = TapTool::new(ops(&gateway));
        let args = ToolArguments::new().with_arg("identifier", "login_button");

        assert!(tool.execute(&args).await.is_success());
        assert_eq!(
            gateway.calls_to(AXE, "tap")[0],
            vec!["tap", "--id", "login_button", "--udid", UDID]
        );
    }

    #[tokio::test]
    async fn test_coordinates_and_identifier_rejected_before_any_process() {
        let gateway = Arc::new(booted());
        let tool = TapTool::new(ops(&gateway));
        let args = ToolArguments::new()
            .with_arg("x", 1)
            .with_arg("y", 2)
            .with_arg("identifier", "login_button");

        let response = tool.execute(&args).await;

        assert!(!response.is_success());
        assert!(response.first_text().unwrap().starts_with("Error tapping:"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_coordinate() {
        let gateway = Arc::new(booted());
        let tool = TapTool::new(ops(&gateway));
        let args = ToolArguments::new().with_arg("x", -5).with_arg("y", 10);

        let response = tool.execute(&args).await;

        assert!(!response.is_success());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_label_with_metacharacters_rejected() {
        let gateway = Arc::new(booted());
        let tool = TapTool::new(ops(&gateway));
        let args = ToolArguments::new().with_arg("label", "OK`reboot`");

        assert!(!tool.execute(&args).await.is_success());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_no_booted_device() {
        let gateway = Arc::new(idle());
        let tool = TapTool::new(ops(&gateway));
        let args = ToolArguments::new().with_arg("label", "Continue");

        let response = tool.execute(&args).await;

        assert!(response.first_text().unwrap().contains("No booted simulator found"));
        assert!(gateway.calls_to(AXE, "tap").is_empty());
    }
}
