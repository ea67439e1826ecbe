//! Device operations facade
//!
//! High-level simulator actions, each expressed as one or two gateway
//! invocations built from literals and validated values. Operations that
//! target a device resolve the booted simulator first and fail with
//! [`SimulatorError::NoActiveDevice`] before any UI command is issued.

use crate::ports::command_gateway::CommandGatewayPort;
use serde_json::Value;
use simbridge_domain::device::find_booted_udid;
use simbridge_domain::validation::{
    DeviceUdid, Identifier, ValidatedArgument, ValidationError, validate_device_id,
    validate_free_text,
};
use simbridge_domain::{
    AXE, CommandInvocation, GestureOptions, GesturePreset, SimulatorError, SwipeRequest,
    SwipeSpec, TapSpec, XCRUN,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

const LIST_DEVICES: &[&str] = &["simctl", "list", "devices"];
const LIST_DEVICES_JSON: &[&str] = &["simctl", "list", "devices", "--json"];
const SCREENSHOT: &[&str] = &["simctl", "io", "booted", "screenshot", "--type=png", "-"];

/// Facade over the gateway for every simulator action the tools need.
#[derive(Clone)]
pub struct DeviceOperations {
    gateway: Arc<dyn CommandGatewayPort>,
}

impl DeviceOperations {
    pub fn new(gateway: Arc<dyn CommandGatewayPort>) -> Self {
        Self { gateway }
    }

    /// Whether a booted simulator exists right now.
    ///
    /// Probe failures are reported as "not available".
    pub async fn is_active_device_available(&self) -> bool {
        match self.resolve_active_device_id().await {
            Ok(found) => found.is_some(),
            Err(e) => {
                debug!("Active device probe failed: {}", e);
                false
            }
        }
    }

    /// UDID of the first booted simulator, if any.
    ///
    /// Nothing is cached: every call queries the device list again.
    pub async fn resolve_active_device_id(&self) -> Result<Option<DeviceUdid>, SimulatorError> {
        let result = self.gateway.execute_fixed(XCRUN, LIST_DEVICES).await?;
        let listing = result.stdout.text();

        match find_booted_udid(&listing) {
            Some(raw) => {
                let udid = validate_device_id(raw)?;
                debug!("Active device: {}", udid);
                Ok(Some(udid))
            }
            None => Ok(None),
        }
    }

    async fn require_active_device(&self) -> Result<DeviceUdid, SimulatorError> {
        self.resolve_active_device_id()
            .await?
            .ok_or(SimulatorError::NoActiveDevice)
    }

    /// Raw structured device enumeration (`simctl list devices --json`).
    pub async fn enumerate_devices(&self) -> Result<Value, SimulatorError> {
        let result = self.gateway.execute_fixed(XCRUN, LIST_DEVICES_JSON).await?;
        serde_json::from_str(&result.stdout.text())
            .map_err(|e| SimulatorError::ParseFailure(format!("device list: {e}")))
    }

    /// PNG bytes of the booted simulator's screen.
    pub async fn capture_screenshot(&self) -> Result<Vec<u8>, SimulatorError> {
        let invocation = CommandInvocation::new(XCRUN)
            .literals(SCREENSHOT)
            .binary_output();
        let result = self.gateway.execute(&invocation).await?;

        let bytes = result.stdout.into_bytes();
        if bytes.is_empty() {
            return Err(SimulatorError::ParseFailure(
                "screenshot produced no image data".to_string(),
            ));
        }
        info!("Captured screenshot ({} bytes)", bytes.len());
        Ok(bytes)
    }

    /// Tap by coordinates, accessibility id or label.
    ///
    /// An id or label starting with `-` is rejected before the device is
    /// resolved, since `axe` would parse it as a flag.
    pub async fn tap(&self, spec: &TapSpec) -> Result<String, SimulatorError> {
        let invocation = match spec {
            TapSpec::Coordinates { x, y } => CommandInvocation::new(AXE)
                .literals(&["tap", "-x"])
                .value(x)
                .literal("-y")
                .value(y),
            TapSpec::ById(id) => CommandInvocation::new(AXE)
                .literals(&["tap", "--id"])
                .value(option_value(id)?),
            TapSpec::ByLabel(label) => CommandInvocation::new(AXE)
                .literals(&["tap", "--label"])
                .value(option_value(label)?),
        };
        let udid = self.require_active_device().await?;

        let invocation = invocation.literal("--udid").value(&udid);

        self.run_interaction(&invocation, "Tap completed").await
    }

    pub async fn swipe(&self, spec: &SwipeSpec) -> Result<String, SimulatorError> {
        let udid = self.require_active_device().await?;

        let invocation = CommandInvocation::new(AXE)
            .literals(&["swipe", "--start-x"])
            .value(&spec.start_x)
            .literal("--start-y")
            .value(&spec.start_y)
            .literal("--end-x")
            .value(&spec.end_x)
            .literal("--end-y")
            .value(&spec.end_y)
            .optional("--duration", spec.duration)
            .literal("--udid")
            .value(&udid);

        self.run_interaction(&invocation, "Swipe completed").await
    }

    /// Perform a named gesture.
    ///
    /// `preset` must be one of [`GesturePreset::ALL`]; an unknown name fails
    /// before any process is started.
    pub async fn gesture(
        &self,
        preset: &str,
        options: GestureOptions,
    ) -> Result<String, SimulatorError> {
        let preset: GesturePreset = preset.parse()?;
        let udid = self.require_active_device().await?;

        let invocation = CommandInvocation::new(AXE)
            .literal("gesture")
            .literal(preset.as_str())
            .literal("--udid")
            .value(&udid)
            .optional("--duration", options.duration)
            .optional("--pre-delay", options.pre_delay)
            .optional("--post-delay", options.post_delay);

        self.run_interaction(&invocation, "Gesture completed").await
    }

    /// Dispatch a swipe request to [`Self::gesture`] or [`Self::swipe`].
    pub async fn perform_swipe(&self, request: &SwipeRequest) -> Result<String, SimulatorError> {
        match request {
            SwipeRequest::Gesture { preset, options } => self.gesture(preset, *options).await,
            SwipeRequest::Swipe(spec) => self.swipe(spec).await,
        }
    }

    /// Type text into the focused field.
    ///
    /// The text is validated before the device is resolved.
    pub async fn type_text(&self, text: &str) -> Result<String, SimulatorError> {
        let text = validate_free_text(text)?;
        let udid = self.require_active_device().await?;

        // `--` ends option parsing so text such as `--help` is typed verbatim
        let invocation = CommandInvocation::new(AXE)
            .literals(&["type", "--udid"])
            .value(&udid)
            .literal("--")
            .value(text);

        self.run_interaction(&invocation, "Text typed").await
    }

    /// Accessibility hierarchy of the booted simulator as parsed JSON.
    pub async fn describe_accessibility_tree(&self) -> Result<Value, SimulatorError> {
        let udid = self.require_active_device().await?;

        let invocation = CommandInvocation::new(AXE)
            .literals(&["describe-ui", "--udid"])
            .value(&udid);
        let result = self.gateway.execute(&invocation).await?;

        serde_json::from_str(&result.stdout.text()).map_err(|e| {
            warn!("describe-ui returned malformed JSON: {}", e);
            SimulatorError::ParseFailure(format!("accessibility hierarchy: {e}"))
        })
    }

    /// Launch an installed app on the booted simulator.
    pub async fn launch_app(
        &self,
        bundle_id: &Identifier,
        terminate_running: bool,
    ) -> Result<String, SimulatorError> {
        let udid = self.require_active_device().await?;

        // Anything after the bundle id is passed to the app, so flags go first
        let mut invocation = CommandInvocation::new(XCRUN).literals(&["simctl", "launch"]);
        if terminate_running {
            invocation = invocation.literal("--terminate-running-process");
        }
        let invocation = invocation.value(&udid).value(bundle_id);

        self.run_interaction(&invocation, "App launched").await
    }

    /// Run a UI command and return its trimmed output, or `fallback` when
    /// the command printed nothing.
    async fn run_interaction(
        &self,
        invocation: &CommandInvocation,
        fallback: &str,
    ) -> Result<String, SimulatorError> {
        let result = self.gateway.execute(invocation).await?;
        let output = result.stdout.text();
        let trimmed = output.trim();

        if trimmed.is_empty() {
            Ok(fallback.to_string())
        } else {
            Ok(trimmed.to_string())
        }
    }
}

/// Admit a validated value in option-value position only if it cannot be
/// mistaken for a flag.
fn option_value(arg: impl Into<ValidatedArgument>) -> Result<ValidatedArgument, ValidationError> {
    let arg = arg.into();
    if arg.render().starts_with('-') {
        return Err(ValidationError::OptionLike { kind: arg.kind() });
    }
    Ok(arg)
}
