//! Presentation layer for simbridge
//!
//! This crate contains the CLI definitions, console output for
//! diagnostics, and the stdio JSON-RPC dispatch server.

pub mod cli;
pub mod output;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
pub use server::{RequestHandler, ServerError};
