//! Simulator device records and the parsers that produce them.

use crate::core::error::SimulatorError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const RUNTIME_PREFIX: &str = "com.apple.CoreSimulator.SimRuntime.";

static BOOTED_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\(([0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12})\)\s*\(Booted\)",
    )
    .expect("booted line pattern is valid")
});

/// Lifecycle state reported by `simctl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DeviceState {
    Booted,
    Shutdown,
    /// Transitional or unknown states ("Booting", "Shutting Down", ...).
    Other(String),
}

impl DeviceState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Booted" => DeviceState::Booted,
            "Shutdown" => DeviceState::Shutdown,
            other => DeviceState::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeviceState::Booted => "Booted",
            DeviceState::Shutdown => "Shutdown",
            DeviceState::Other(s) => s,
        }
    }
}

impl From<String> for DeviceState {
    fn from(raw: String) -> Self {
        DeviceState::parse(&raw)
    }
}

impl From<DeviceState> for String {
    fn from(state: DeviceState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulator device as enumerated at one point in time. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub udid: String,
    pub state: DeviceState,
    /// Human-readable runtime, e.g. `iOS 17.0`.
    pub platform_version: String,
    pub is_available: bool,
}

impl Device {
    pub fn is_booted(&self) -> bool {
        self.state == DeviceState::Booted
    }
}

/// Turn a runtime identifier into a display version.
///
/// `com.apple.CoreSimulator.SimRuntime.iOS-17-0` → `iOS 17.0`.
/// Identifiers without the CoreSimulator prefix are returned unchanged.
pub fn platform_version_from_runtime(runtime: &str) -> String {
    let Some(rest) = runtime.strip_prefix(RUNTIME_PREFIX) else {
        return runtime.to_string();
    };
    match rest.split_once('-') {
        Some((platform, version)) => format!("{} {}", platform, version.replace('-', ".")),
        None => rest.to_string(),
    }
}

#[derive(Deserialize)]
struct DeviceListPayload {
    devices: std::collections::BTreeMap<String, Vec<RawDevice>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDevice {
    name: String,
    udid: String,
    state: String,
    #[serde(default)]
    is_available: bool,
}

/// Project `simctl list devices --json` output into [`Device`] records.
///
/// Runtimes are visited in key order, devices in the order listed.
pub fn project_devices(
    payload: &serde_json::Value,
    available_only: bool,
) -> Result<Vec<Device>, SimulatorError> {
    let parsed: DeviceListPayload = serde_json::from_value(payload.clone())
        .map_err(|e| SimulatorError::ParseFailure(format!("device list: {e}")))?;

    let devices = parsed
        .devices
        .into_iter()
        .flat_map(|(runtime, devices)| {
            let platform_version = platform_version_from_runtime(&runtime);
            devices.into_iter().map(move |d| Device {
                name: d.name,
                udid: d.udid,
                state: DeviceState::parse(&d.state),
                platform_version: platform_version.clone(),
                is_available: d.is_available,
            })
        })
        .filter(|d| !available_only || d.is_available)
        .collect();

    Ok(devices)
}

/// Find the UDID of the first booted device in `simctl list devices` text output.
///
/// The result is *not* validated; callers must pass it through
/// [`validate_device_id`](crate::validation::validate_device_id).
pub fn find_booted_udid(listing: &str) -> Option<&str> {
    listing
        .lines()
        .find_map(|line| BOOTED_LINE_RE.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
