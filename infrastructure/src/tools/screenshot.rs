//! Screenshot tool: capture the booted simulator's screen as PNG

use super::{failure, require_active_device};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use simbridge_application::DeviceOperations;
use simbridge_domain::{Tool, ToolArguments, ToolDescriptor, ToolResponse};
use tracing::debug;

/// Tool name constant
pub const SCREENSHOT: &str = "screenshot";

const CONTEXT: &str = "Error capturing screenshot";

pub struct ScreenshotTool {
    ops: DeviceOperations,
    descriptor: ToolDescriptor,
}

impl ScreenshotTool {
    pub fn new(ops: DeviceOperations) -> Self {
        Self {
            ops,
            descriptor: ToolDescriptor::new(
                SCREENSHOT,
                "Capture a PNG screenshot of the booted iOS simulator.",
            ),
        }
    }
}

#[async_trait]
impl Tool for ScreenshotTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, _args: &ToolArguments) -> ToolResponse {
        if let Err(response) = require_active_device(&self.ops, CONTEXT).await {
            return response;
        }

        match self.ops.capture_screenshot().await {
            Ok(bytes) => {
                debug!("Encoding {} byte screenshot", bytes.len());
                ToolResponse::image(STANDARD.encode(&bytes), "image/png")
            }
            Err(e) => failure(CONTEXT, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::NO_ACTIVE_DEVICE_MESSAGE;
    use crate::tools::test_support::{booted, idle, ops};
    use simbridge_domain::{CommandResult, ContentPart, SimulatorError, XCRUN};
    use std::sync::Arc;

    const CAPTURE: &[&str] = &["simctl", "io", "booted", "screenshot"];

    #[tokio::test]
    async fn test_returns_base64_png() {
        let gateway = Arc::new(booted().on(
            XCRUN,
            CAPTURE,
            Ok(CommandResult::binary(b"\x89PNG".to_vec())),
        ));
        let tool = ScreenshotTool::new(ops(&gateway));

        let response = tool.execute(&ToolArguments::new()).await;

        assert!(response.is_success());
        assert_eq!(
            response.content,
            vec![ContentPart::Image {
                data: "iVBORw==".to_string(),
                mime_type: "image/png".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_no_booted_device() {
        let gateway = Arc::new(idle());
        let tool = ScreenshotTool::new(ops(&gateway));

        let response = tool.execute(&ToolArguments::new()).await;

        assert!(!response.is_success());
        assert_eq!(
            response.first_text().unwrap(),
            format!("{CONTEXT}: {NO_ACTIVE_DEVICE_MESSAGE}")
        );
        assert!(gateway.calls_to(XCRUN, "simctl").iter().all(|argv| argv[1] != "io"));
    }

    #[tokio::test]
    async fn test_capture_failure_is_reported() {
        let gateway = Arc::new(booted().on(
            XCRUN,
            CAPTURE,
            Err(SimulatorError::command_failed(Some(1), "Simulator is shutting down")),
        ));
        let tool = ScreenshotTool::new(ops(&gateway));

        let response = tool.execute(&ToolArguments::new()).await;
        assert_eq!(
            response.first_text(),
            Some("Error capturing screenshot: Command failed (exit status 1): Simulator is shutting down")
        );
    }
}
