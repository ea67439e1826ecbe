//! Simulator tools
//!
//! Each tool is a thin adapter over [`DeviceOperations`]: it turns the
//! caller's argument bag into typed requests, checks for a booted simulator
//! where one is needed, forwards to the facade, and maps every outcome into
//! a [`ToolResponse`].
//!
//! | Tool | Needs a booted device | Output |
//! |------|----------------------|--------|
//! | `screenshot` | yes | PNG image |
//! | `list_devices` | no | device list (JSON text) |
//! | `get_active_device` | yes | UDID |
//! | `tap` / `swipe` / `type_text` | yes | status text |
//! | `describe_ui` | yes | elements or raw tree (JSON text) |
//! | `launch_app` | yes | status text |

pub mod active_device;
pub mod describe_ui;
pub mod launch_app;
pub mod list_devices;
pub mod screenshot;
pub mod swipe;
pub mod tap;
pub mod type_text;

mod registry;

pub use active_device::GetActiveDeviceTool;
pub use describe_ui::DescribeUiTool;
pub use launch_app::LaunchAppTool;
pub use list_devices::ListDevicesTool;
pub use registry::ToolRegistry;
pub use screenshot::ScreenshotTool;
pub use swipe::SwipeTool;
pub use tap::TapTool;
pub use type_text::TypeTextTool;

use simbridge_application::DeviceOperations;
use simbridge_domain::{SimulatorError, ToolResponse};

/// Shown whenever a tool needs a booted simulator and none is running.
pub const NO_ACTIVE_DEVICE_MESSAGE: &str = "No booted simulator found. Boot one with \
    `xcrun simctl boot <UDID>` or open Simulator.app, then try again.";

/// Registry with every simulator tool registered.
pub fn default_registry(ops: DeviceOperations) -> ToolRegistry {
    ToolRegistry::new()
        .register(ScreenshotTool::new(ops.clone()))
        .register(ListDevicesTool::new(ops.clone()))
        .register(GetActiveDeviceTool::new(ops.clone()))
        .register(TapTool::new(ops.clone()))
        .register(SwipeTool::new(ops.clone()))
        .register(TypeTextTool::new(ops.clone()))
        .register(DescribeUiTool::new(ops.clone()))
        .register(LaunchAppTool::new(ops))
}

/// Map a facade error into an error response.
pub(crate) fn failure(context: &str, err: SimulatorError) -> ToolResponse {
    match err {
        SimulatorError::NoActiveDevice => ToolResponse::error(context, NO_ACTIVE_DEVICE_MESSAGE),
        other => ToolResponse::error(context, other),
    }
}

/// Proactive booted-device check, returning the response to send if absent.
pub(crate) async fn require_active_device(
    ops: &DeviceOperations,
    context: &str,
) -> Result<(), ToolResponse> {
    if ops.is_active_device_available().await {
        Ok(())
    } else {
        Err(ToolResponse::error(context, NO_ACTIVE_DEVICE_MESSAGE))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use simbridge_application::DeviceOperations;
    use simbridge_application::ports::command_gateway::testing::ScriptedCommandGateway;
    use simbridge_domain::{CommandResult, XCRUN};
    use std::sync::Arc;

    pub const UDID: &str = "A1B2C3D4-E5F6-4A1B-8C9D-0123456789AB";

    pub const BOOTED_LISTING: &str = "\
== Devices ==
-- iOS 17.0 --
    iPhone 15 Pro (A1B2C3D4-E5F6-4A1B-8C9D-0123456789AB) (Booted)
";

    pub const IDLE_LISTING: &str = "\
== Devices ==
-- iOS 17.0 --
    iPhone 15 Pro (A1B2C3D4-E5F6-4A1B-8C9D-0123456789AB) (Shutdown)
";

    pub fn booted() -> ScriptedCommandGateway {
        ScriptedCommandGateway::new().on(
            XCRUN,
            &["simctl", "list", "devices"],
            Ok(CommandResult::text(BOOTED_LISTING)),
        )
    }

    pub fn idle() -> ScriptedCommandGateway {
        ScriptedCommandGateway::new().on(
            XCRUN,
            &["simctl", "list", "devices"],
            Ok(CommandResult::text(IDLE_LISTING)),
        )
    }

    pub fn ops(gateway: &Arc<ScriptedCommandGateway>) -> DeviceOperations {
        DeviceOperations::new(gateway.clone())
    }
}
