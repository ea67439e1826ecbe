//! Simulator device model.
//!
//! - [`entities`]: [`Device`] records and parsers for `simctl` output
//! - [`interaction`]: typed tap / swipe / gesture requests
//! - [`accessibility`]: projection of the UI hierarchy into flat elements

pub mod accessibility;
pub mod entities;
pub mod interaction;

pub use accessibility::{AccessibilityElement, Frame, flatten_hierarchy};
pub use entities::{
    Device, DeviceState, find_booted_udid, platform_version_from_runtime, project_devices,
};
pub use interaction::{
    GestureOptions, GesturePreset, RawSwipeArgs, SwipeRequest, SwipeSpec, TapSpec,
};
