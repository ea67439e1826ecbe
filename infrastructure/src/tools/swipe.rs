//! Swipe tool: a named gesture or an explicit point-to-point swipe

use super::{failure, require_active_device};
use async_trait::async_trait;
use simbridge_application::DeviceOperations;
use simbridge_domain::{
    GesturePreset, ParameterType, RawSwipeArgs, SwipeRequest, Tool, ToolArguments,
    ToolDescriptor, ToolParameter, ToolResponse,
};

/// Tool name constant
pub const SWIPE: &str = "swipe";

const CONTEXT: &str = "Error swiping";

pub struct SwipeTool {
    ops: DeviceOperations,
    descriptor: ToolDescriptor,
}

impl SwipeTool {
    pub fn new(ops: DeviceOperations) -> Self {
        let presets: Vec<&str> = GesturePreset::ALL.iter().map(|p| p.as_str()).collect();
        let coordinate = |name: &str, description: &str| {
            ToolParameter::new(name, description, false).with_type(ParameterType::Number)
        };

        Self {
            ops,
            descriptor: ToolDescriptor::new(
                SWIPE,
                "Swipe on the booted simulator. Provide either a named gesture, \
                 or all of start_x, start_y, end_x and end_y.",
            )
            .with_parameter(
                ToolParameter::new("gesture", "Named gesture preset", false)
                    .with_allowed_values(&presets),
            )
            .with_parameter(coordinate("start_x", "Start X coordinate in points"))
            .with_parameter(coordinate("start_y", "Start Y coordinate in points"))
            .with_parameter(coordinate("end_x", "End X coordinate in points"))
            .with_parameter(coordinate("end_y", "End Y coordinate in points"))
            .with_parameter(coordinate("duration", "Duration in seconds (0-60)")),
        }
    }
}

#[async_trait]
impl Tool for SwipeTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, args: &ToolArguments) -> ToolResponse {
        let request = match SwipeRequest::from_raw(RawSwipeArgs {
            gesture: args.get_string("gesture"),
            start_x: args.get("start_x"),
            start_y: args.get("start_y"),
            end_x: args.get("end_x"),
            end_y: args.get("end_y"),
            duration: args.get("duration"),
        }) {
            Ok(request) => request,
            Err(e) => return ToolResponse::error(CONTEXT, e),
        };

        if let Err(response) = require_active_device(&self.ops, CONTEXT).await {
            return response;
        }

        match self.ops.perform_swipe(&request).await {
            Ok(message) => ToolResponse::text(message),
            Err(e) => failure(CONTEXT, e),
        }
    }
}
