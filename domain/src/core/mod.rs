//! Core domain concepts shared across all subdomains.
//!
//! - [`error::SimulatorError`]: the error taxonomy for device operations
//! - [`string::truncate`]: UTF-8 safe truncation for log previews

pub mod error;
pub mod string;
