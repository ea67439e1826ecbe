//! UI description tool: describe_ui
//!
//! `summary` (the default) flattens the accessibility hierarchy into the
//! elements a caller can target; `full` returns the hierarchy as reported.

use super::{failure, require_active_device};
use async_trait::async_trait;
use serde_json::json;
use simbridge_application::DeviceOperations;
use simbridge_domain::device::flatten_hierarchy;
use simbridge_domain::{Tool, ToolArguments, ToolDescriptor, ToolParameter, ToolResponse};

/// Tool name constant
pub const DESCRIBE_UI: &str = "describe_ui";

const CONTEXT: &str = "Error describing UI";

pub struct DescribeUiTool {
    ops: DeviceOperations,
    descriptor: ToolDescriptor,
}

impl DescribeUiTool {
    pub fn new(ops: DeviceOperations) -> Self {
        Self {
            ops,
            descriptor: ToolDescriptor::new(
                DESCRIBE_UI,
                "Describe the accessibility hierarchy of the booted simulator's screen.",
            )
            .with_parameter(
                ToolParameter::new(
                    "format",
                    "'summary' lists labeled or identified elements (default); \
                     'full' returns the raw hierarchy",
                    false,
                )
                .with_allowed_values(&["summary", "full"]),
            ),
        }
    }
}

#[async_trait]
impl Tool for DescribeUiTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, args: &ToolArguments) -> ToolResponse {
        let full = match args.get_string("format").unwrap_or("summary") {
            "summary" => false,
            "full" => true,
            other => {
                return ToolResponse::error(
                    CONTEXT,
                    format!("unknown format '{other}', expected 'summary' or 'full'"),
                );
            }
        };

        if let Err(response) = require_active_device(&self.ops, CONTEXT).await {
            return response;
        }

        let tree = match self.ops.describe_accessibility_tree().await {
            Ok(tree) => tree,
            Err(e) => return failure(CONTEXT, e),
        };

        let body = if full {
            tree
        } else {
            match flatten_hierarchy(&tree) {
                Ok(elements) => json!({ "count": elements.len(), "elements": elements }),
                Err(e) => return failure(CONTEXT, e),
            }
        };

        match serde_json::to_string_pretty(&body) {
            Ok(text) => ToolResponse::text(text),
            Err(e) => ToolResponse::error(CONTEXT, e),
        }
    }
}
