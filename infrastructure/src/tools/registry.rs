//! Tool Registry
//!
//! The [`ToolRegistry`] maps tool names to [`Tool`] implementations. It is
//! built once at startup and read-only afterwards.
//!
//! # Usage
//!
//! ```ignore
//! use simbridge_infrastructure::tools::{ScreenshotTool, TapTool, ToolRegistry};
//!
//! let registry = ToolRegistry::new()
//!     .register(ScreenshotTool::new(ops.clone()))
//!     .register(TapTool::new(ops));
//!
//! let args = ToolArguments::new().with_arg("label", "Continue");
//! let response = registry.call("tap", &args).await;
//! ```
//!
//! # Name Conflicts
//!
//! Registering a second tool under an existing name replaces the first.
//! This is logged as a warning since it almost always indicates a wiring
//! mistake.

use std::collections::HashMap;
use std::sync::Arc;

use simbridge_domain::{
    ArgumentValidator, DefaultArgumentValidator, Tool, ToolArguments, ToolDescriptor,
    ToolResponse,
};

/// Name → tool lookup table
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    validator: DefaultArgumentValidator,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            validator: DefaultArgumentValidator,
        }
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(self, tool: T) -> Self {
        self.register_arc(Arc::new(tool))
    }

    /// Register a tool (Arc version)
    pub fn register_arc(mut self, tool: Arc<dyn Tool>) -> Self {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "Tool registered twice; keeping the latest");
        } else {
            tracing::debug!(tool = %name, "Registered tool");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Descriptors of every registered tool, sorted by name
    pub fn list_descriptors(&self) -> Vec<&ToolDescriptor> {
        let mut descriptors: Vec<_> = self.tools.values().map(|t| t.descriptor()).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Get names of all registered tools, sorted
    pub fn names(&self) -> Vec<&str> {
        self.list_descriptors()
            .into_iter()
            .map(|d| d.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up `name`, check `args` against its declared shape, and run it.
    ///
    /// Returns `None` when no tool has that name. A shape mismatch is an
    /// error response and the tool is not run.
    pub async fn call(&self, name: &str, args: &ToolArguments) -> Option<ToolResponse> {
        let tool = self.get(name)?;

        if let Err(e) = self.validator.validate(args, tool.descriptor()) {
            tracing::debug!(tool = %name, error = %e, "Rejected tool arguments");
            return Some(ToolResponse::error("Invalid arguments", e));
        }

        tracing::debug!(tool = %name, "Executing tool");
        let response = tool.execute(args).await;
        if response.is_error {
            tracing::warn!(
                tool = %name,
                error = response.first_text().unwrap_or_default(),
                "Tool returned an error"
            );
        }
        Some(response)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::default_registry;
    use crate::tools::test_support::{booted, ops};
    use async_trait::async_trait;
    use simbridge_domain::ToolParameter;

    struct Echo {
        descriptor: ToolDescriptor,
        reply: &'static str,
    }

    impl Echo {
        fn new(name: &str, reply: &'static str) -> Self {
            Self {
                descriptor: ToolDescriptor::new(name, "Echo a fixed reply")
                    .with_parameter(ToolParameter::new("text", "Anything", false)),
                reply,
            }
        }
    }

    #[async_trait]
    impl Tool for Echo {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.descriptor
        }

        async fn execute(&self, _args: &ToolArguments) -> ToolResponse {
            ToolResponse::text(self.reply)
        }
    }

    #[tokio::test]
    async fn test_get_and_call() {
        let registry = ToolRegistry::new().register(Echo::new("echo", "hi"));

        assert!(registry.get("echo").is_some());
        assert!(registry.get("missing").is_none());

        let response = registry.call("echo", &ToolArguments::new()).await;
        assert_eq!(response, Some(ToolResponse::text("hi")));
        assert!(registry.call("missing", &ToolArguments::new()).await.is_none());
    }

    #[tokio::test]
    async fn test_last_registration_wins() {
        let registry = ToolRegistry::new()
            .register(Echo::new("echo", "first"))
            .register(Echo::new("echo", "second"));

        assert_eq!(registry.len(), 1);
        let response = registry.call("echo", &ToolArguments::new()).await.unwrap();
        assert_eq!(response.first_text(), Some("second"));
    }

    #[tokio::test]
    async fn test_unknown_argument_rejected_before_execute() {
        let registry = ToolRegistry::new().register(Echo::new("echo", "hi"));
        let args = ToolArguments::new().with_arg("command", "rm -rf /");

        let response = registry.call("echo", &args).await.unwrap();

        assert!(!response.is_success());
        assert_eq!(
            response.first_text(),
            Some("Invalid arguments: Unknown parameter 'command' for tool 'echo'")
        );
    }

    struct Failing {
        descriptor: ToolDescriptor,
    }

    #[async_trait]
    impl Tool for Failing {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.descriptor
        }

        async fn execute(&self, _args: &ToolArguments) -> ToolResponse {
            ToolResponse::error("Error tapping", "No booted simulator found")
        }
    }

    #[tokio::test]
    async fn test_tool_error_is_returned_unchanged() {
        let registry = ToolRegistry::new().register(Failing {
            descriptor: ToolDescriptor::new("tap", "Always fails"),
        });

        let response = registry.call("tap", &ToolArguments::new()).await.unwrap();

        assert!(response.is_error);
        assert_eq!(
            response.first_text(),
            Some("Error tapping: No booted simulator found")
        );
    }

    #[test]
    fn test_default_registry_descriptors_sorted() {
        let gateway = std::sync::Arc::new(booted());
        let registry = default_registry(ops(&gateway));

        assert_eq!(
            registry.names(),
            vec![
                "describe_ui",
                "get_active_device",
                "launch_app",
                "list_devices",
                "screenshot",
                "swipe",
                "tap",
                "type_text"
            ]
        );
        assert!(gateway.calls().is_empty());
    }
}
