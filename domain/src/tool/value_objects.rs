//! Tool response: the only shape that crosses the dispatch boundary.
//!
//! Successful calls carry one or more content parts (text and/or an
//! image). Failures carry a single text part and `isError: true`; internal
//! error types never leak past this point.

use serde::{Deserialize, Serialize};

/// One piece of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text {
        text: String,
    },
    Image {
        /// Base64-encoded image bytes
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

/// Normalized tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<ContentPart>,
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResponse {
    /// Successful response with a single text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentPart::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Successful response with a single image part
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            content: vec![ContentPart::Image {
                data: data.into(),
                mime_type: mime_type.into(),
            }],
            is_error: false,
        }
    }

    /// Error response: `"<context>: <message>"`
    pub fn error(context: &str, message: impl std::fmt::Display) -> Self {
        Self {
            content: vec![ContentPart::Text {
                text: format!("{context}: {message}"),
            }],
            is_error: true,
        }
    }

    pub fn with_part(mut self, part: ContentPart) -> Self {
        self.content.push(part);
        self
    }

    pub fn is_success(&self) -> bool {
        !self.is_error
    }

    /// First text part, if any
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|part| match part {
            ContentPart::Text { text } => Some(text.as_str()),
            ContentPart::Image { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_response_serialization() {
        let response = ToolResponse::text("Tapped");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"content": [{"type": "text", "text": "Tapped"}]})
        );
    }

    #[test]
    fn test_image_response_serialization() {
        let response = ToolResponse::image("aGVsbG8=", "image/png");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"content": [{"type": "image", "data": "aGVsbG8=", "mimeType": "image/png"}]})
        );
    }

    #[test]
    fn test_error_response() {
        let response = ToolResponse::error("Error tapping", "No booted simulator found");
        assert!(!response.is_success());
        assert_eq!(
            response.first_text(),
            Some("Error tapping: No booted simulator found")
        );
        assert_eq!(serde_json::to_value(&response).unwrap()["isError"], true);
    }
}
