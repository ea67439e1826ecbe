//! Text entry tool: type_text

use super::{failure, require_active_device};
use async_trait::async_trait;
use simbridge_application::DeviceOperations;
use simbridge_domain::validation::validate_free_text;
use simbridge_domain::{Tool, ToolArguments, ToolDescriptor, ToolParameter, ToolResponse};

/// Tool name constant
pub const TYPE_TEXT: &str = "type_text";

const CONTEXT: &str = "Error typing text";

pub struct TypeTextTool {
    ops: DeviceOperations,
    descriptor: ToolDescriptor,
}

impl TypeTextTool {
    pub fn new(ops: DeviceOperations) -> Self {
        Self {
            ops,
            descriptor: ToolDescriptor::new(
                TYPE_TEXT,
                "Type text into the focused field of the booted simulator.",
            )
            .with_parameter(ToolParameter::new(
                "text",
                "Text to type (shell metacharacters are rejected)",
                true,
            )),
        }
    }
}

#[async_trait]
impl Tool for TypeTextTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, args: &ToolArguments) -> ToolResponse {
        let text = match args.require_string("text") {
            Ok(text) => text,
            Err(e) => return ToolResponse::error(CONTEXT, e),
        };
        // Reject bad input before probing for a device
        if let Err(e) = validate_free_text(text) {
            return ToolResponse::error(CONTEXT, e);
        }

        if let Err(response) = require_active_device(&self.ops, CONTEXT).await {
            return response;
        }

        match self.ops.type_text(text).await {
            Ok(message) => ToolResponse::text(message),
            Err(e) => failure(CONTEXT, e),
        }
    }
}
