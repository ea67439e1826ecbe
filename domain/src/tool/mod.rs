//! Tool domain module
//!
//! Defines the contract every remotely invocable operation satisfies.
//!
//! ```text
//! ┌────────────────┐    ┌────────────────┐    ┌────────────────┐
//! │ ToolDescriptor │───▶│ ToolArguments  │───▶│ ToolResponse   │
//! │ (name, shape)  │    │ (caller input) │    │ (content parts)│
//! └────────────────┘    └────────────────┘    └────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Tool`]: name + declared input shape + `execute`
//! - [`ToolDescriptor`]: immutable name/description/parameters
//! - [`ToolArguments`]: the loose argument bag a caller sends
//! - [`ToolResponse`]: success content or `isError` message
//! - [`ArgumentValidator`]: shape check against a descriptor, no I/O
//!
//! Concrete tools and the registry live in the infrastructure layer.

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ParameterType, ToolArguments, ToolDescriptor, ToolParameter};
pub use traits::{ArgumentValidator, DefaultArgumentValidator, Tool};
pub use value_objects::{ContentPart, ToolResponse};
