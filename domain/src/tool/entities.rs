//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Boolean,
}

impl ParameterType {
    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Name, description and input shape of a tool. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique name of the tool (e.g., "tap")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub param_type: ParameterType,
    /// Closed set of accepted values, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Render the declared input shape as a JSON Schema object.
    pub fn input_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            let mut prop = serde_json::Map::new();
            prop.insert("type".to_string(), serde_json::json!(param.param_type.as_str()));
            prop.insert(
                "description".to_string(),
                serde_json::json!(param.description),
            );
            if let Some(values) = &param.allowed_values {
                prop.insert("enum".to_string(), serde_json::json!(values));
            }
            properties.insert(param.name.clone(), serde_json::Value::Object(prop));

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParameterType::String,
            allowed_values: None,
        }
    }

    pub fn with_type(mut self, param_type: ParameterType) -> Self {
        self.param_type = param_type;
        self
    }

    pub fn with_allowed_values(mut self, values: &[&str]) -> Self {
        self.allowed_values = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }
}

/// Argument bag passed to a tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolArguments {
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

impl ToolArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON value; `null` and absent mean "no arguments".
    pub fn from_value(value: Option<serde_json::Value>) -> Result<Self, String> {
        match value {
            None | Some(serde_json::Value::Null) => Ok(Self::new()),
            Some(serde_json::Value::Object(map)) => Ok(Self {
                values: map.into_iter().collect(),
            }),
            Some(other) => Err(format!("arguments must be an object, got {other}")),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Raw value for `key`. Explicit `null` is treated as absent.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, _)| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_schema() {
        let descriptor = ToolDescriptor::new("describe_ui", "Describe the screen")
            .with_parameter(
                ToolParameter::new("format", "Output format", false)
                    .with_allowed_values(&["summary", "full"]),
            )
            .with_parameter(
                ToolParameter::new("x", "X coordinate", true).with_type(ParameterType::Number),
            );

        let schema = descriptor.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["format"]["type"], "string");
        assert_eq!(schema["properties"]["format"]["enum"], json!(["summary", "full"]));
        assert_eq!(schema["properties"]["x"]["type"], "number");
        assert_eq!(schema["required"], json!(["x"]));
    }

    #[test]
    fn test_empty_schema_has_no_required_fields() {
        let schema = ToolDescriptor::new("screenshot", "Capture").input_schema();
        assert_eq!(schema["properties"], json!({}));
        assert_eq!(schema["required"], json!([]));
    }

    #[test]
    fn test_arguments_from_value() {
        let args = ToolArguments::from_value(Some(json!({"text": "hi", "x": null}))).unwrap();
        assert_eq!(args.get_string("text"), Some("hi"));
        assert!(args.get("x").is_none());
        assert_eq!(args.keys().collect::<Vec<_>>(), vec!["text"]);

        assert!(ToolArguments::from_value(None).unwrap().get("text").is_none());
        assert!(ToolArguments::from_value(Some(json!([1, 2]))).is_err());
    }

    #[test]
    fn test_require_string() {
        let args = ToolArguments::new().with_arg("text", "hello");
        assert_eq!(args.require_string("text").unwrap(), "hello");
        assert!(args.require_string("missing").is_err());
    }
}
