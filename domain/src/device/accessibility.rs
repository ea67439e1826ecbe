//! Accessibility hierarchy projection.
//!
//! The automation tool reports the UI as a nested JSON tree whose nodes are
//! loosely typed. [`flatten_hierarchy`] walks it with an explicit stack (the
//! tree comes from outside and its depth is not trusted) and keeps only the
//! nodes a caller can target: those with a label or an identifier.

use crate::core::error::SimulatorError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Screen rectangle of an element, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One targetable element from the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityElement {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,
}

fn non_empty_string(node: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| node.get(*key))
        .find_map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn frame_of(node: &Value) -> Option<Frame> {
    let frame = node.get("frame")?;
    let field = |name: &str| frame.get(name).and_then(Value::as_f64);
    Some(Frame {
        x: field("x")?,
        y: field("y")?,
        width: field("width")?,
        height: field("height")?,
    })
}

fn element_of(node: &Value) -> Option<AccessibilityElement> {
    let label = non_empty_string(node, &["AXLabel", "label"]);
    let identifier = non_empty_string(node, &["AXUniqueId", "identifier"]);
    if label.is_none() && identifier.is_none() {
        return None;
    }

    Some(AccessibilityElement {
        element_type: non_empty_string(node, &["type", "role"])
            .unwrap_or_else(|| "Unknown".to_string()),
        label,
        identifier,
        value: non_empty_string(node, &["AXValue", "value"]),
        enabled: node.get("enabled").and_then(Value::as_bool).unwrap_or(true),
        frame: frame_of(node),
    })
}

/// Flatten a hierarchy into labeled/identified elements, depth-first pre-order.
///
/// The root may be a single node or an array of nodes. Non-object entries
/// and nodes without `children` are leaves. Fails only when the root itself
/// is neither an object nor an array.
pub fn flatten_hierarchy(root: &Value) -> Result<Vec<AccessibilityElement>, SimulatorError> {
    let mut stack: Vec<&Value> = match root {
        Value::Array(nodes) => nodes.iter().rev().collect(),
        Value::Object(_) => vec![root],
        other => {
            return Err(SimulatorError::ParseFailure(format!(
                "accessibility hierarchy root must be an object or array, got {}",
                json_kind(other)
            )));
        }
    };

    let mut elements = Vec::new();
    while let Some(node) = stack.pop() {
        if !node.is_object() {
            continue;
        }
        if let Some(element) = element_of(node) {
            elements.push(element);
        }
        if let Some(Value::Array(children)) = node.get("children") {
            stack.extend(children.iter().rev());
        }
    }

    Ok(elements)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
