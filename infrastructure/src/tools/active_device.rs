//! Active device tool: get_active_device

use super::{NO_ACTIVE_DEVICE_MESSAGE, failure};
use async_trait::async_trait;
use simbridge_application::DeviceOperations;
use simbridge_domain::{Tool, ToolArguments, ToolDescriptor, ToolResponse};

/// Tool name constant
pub const GET_ACTIVE_DEVICE: &str = "get_active_device";

const CONTEXT: &str = "Error resolving active device";

pub struct GetActiveDeviceTool {
    ops: DeviceOperations,
    descriptor: ToolDescriptor,
}

impl GetActiveDeviceTool {
    pub fn new(ops: DeviceOperations) -> Self {
        Self {
            ops,
            descriptor: ToolDescriptor::new(
                GET_ACTIVE_DEVICE,
                "Return the UDID of the currently booted iOS simulator.",
            ),
        }
    }
}

#[async_trait]
impl Tool for GetActiveDeviceTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, _args: &ToolArguments) -> ToolResponse {
        match self.ops.resolve_active_device_id().await {
            Ok(Some(udid)) => ToolResponse::text(udid.as_str()),
            Ok(None) => ToolResponse::error(CONTEXT, NO_ACTIVE_DEVICE_MESSAGE),
            Err(e) => failure(CONTEXT, e),
        }
    }
}
