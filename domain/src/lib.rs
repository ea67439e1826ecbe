//! Domain layer for simbridge
//!
//! This crate contains the input validators, the simulator device model,
//! command invocation values and the tool contract. It performs no I/O and
//! has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Validation**: every caller value becomes a typed, validated argument
//!   before it can reach a process ([`validation`]).
//! - **Invocation**: a logical executable plus an ordered argument vector
//!   built only from literals and validated values ([`command`]).
//! - **Tools**: uniform descriptor + execute contract returning a
//!   [`ToolResponse`] ([`tool`]).

pub mod command;
pub mod core;
pub mod device;
pub mod tool;
pub mod validation;

// Re-export commonly used types
pub use command::{
    AXE, CommandInvocation, CommandOutput, CommandResult, DEFAULT_MAX_OUTPUT_BYTES,
    ExecutionOptions, InvocationArg, OutputMode, XCRUN,
};
pub use self::core::{error::SimulatorError, string::truncate};
pub use device::{
    AccessibilityElement, Device, DeviceState, Frame, GestureOptions, GesturePreset,
    RawSwipeArgs, SwipeRequest, SwipeSpec, TapSpec,
};
pub use tool::{
    ArgumentValidator, ContentPart, DefaultArgumentValidator, ParameterType, Tool, ToolArguments,
    ToolDescriptor, ToolParameter, ToolResponse,
};
pub use validation::{ValidatedArgument, ValidationError};
