//! Application layer for simbridge
//!
//! This crate contains the device operations facade and the port
//! definitions it depends on. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    command_gateway::CommandGatewayPort,
    invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger},
};
pub use use_cases::device_operations::DeviceOperations;
