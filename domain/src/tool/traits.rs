//! Tool domain traits
//!
//! [`Tool`] is the uniform contract every externally invocable operation
//! implements. [`ArgumentValidator`] checks an argument bag against a
//! descriptor's declared shape before the tool sees it.

use async_trait::async_trait;

use super::entities::{ParameterType, ToolArguments, ToolDescriptor};
use super::value_objects::ToolResponse;

/// An externally invocable operation.
///
/// `execute` must never fail in the Rust sense: every error is mapped into
/// an error [`ToolResponse`].
#[async_trait]
pub trait Tool: Send + Sync {
    fn descriptor(&self) -> &ToolDescriptor;

    fn name(&self) -> &str {
        &self.descriptor().name
    }

    async fn execute(&self, args: &ToolArguments) -> ToolResponse;
}

/// Validator for tool arguments
///
/// Pure shape check: required parameters present, no unknown parameters,
/// JSON types compatible with the declared types, and closed-set values
/// respected. Content validation is the job of [`crate::validation`].
pub trait ArgumentValidator {
    fn validate(&self, args: &ToolArguments, descriptor: &ToolDescriptor) -> Result<(), String>;
}

/// Default implementation of ArgumentValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultArgumentValidator;

impl ArgumentValidator for DefaultArgumentValidator {
    fn validate(&self, args: &ToolArguments, descriptor: &ToolDescriptor) -> Result<(), String> {
        for param in &descriptor.parameters {
            if param.required && args.get(&param.name).is_none() {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, descriptor.name
                ));
            }
        }

        for key in args.keys() {
            let Some(param) = descriptor.parameter(key) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    key, descriptor.name
                ));
            };
            let Some(value) = args.get(key) else {
                continue;
            };

            // Numbers may arrive as numeric strings; the numeric validators coerce them.
            let type_ok = match param.param_type {
                ParameterType::String => value.is_string(),
                ParameterType::Number => value.is_number() || value.is_string(),
                ParameterType::Boolean => value.is_boolean(),
            };
            if !type_ok {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be a {}",
                    key, descriptor.name, param.param_type
                ));
            }

            if let (Some(allowed), Some(s)) = (&param.allowed_values, value.as_str())
                && !allowed.iter().any(|a| a == s)
            {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be one of: {}",
                    key,
                    descriptor.name,
                    allowed.join(", ")
                ));
            }
        }

        Ok(())
    }
}
