//! Tool catalog and invocation result types shared by both sides of the bridge.

use crate::ApiError;
use serde::{Deserialize, Serialize};

/// Arguments for a single tool invocation.
pub type ToolArguments = serde_json::Map<String, serde_json::Value>;

/// A tool as advertised to the local protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Name accepted by the remote API for invocation. Never rewritten.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "inputSchema", default = "default_input_schema")]
    pub input_schema: serde_json::Value,
}

/// Schema used when the remote catalog does not describe a tool's parameters.
pub fn default_input_schema() -> serde_json::Value {
    serde_json::json!({"type": "object", "properties": {}})
}

/// A single content block in a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
}

/// The content envelope returned for `tools/call`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
    #[serde(
        rename = "isError",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub is_error: bool,
}

impl CallToolResult {
    /// Create a successful text result.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Create an error text result.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Render an invocation outcome.
    ///
    /// A payload becomes its pretty-printed JSON. A failure becomes the
    /// pretty-printed `{"success": false, "error": <message>}` with the error
    /// flag set, so the caller always receives parseable data.
    pub fn from_outcome(outcome: Result<serde_json::Value, ApiError>) -> Self {
        match outcome {
            Ok(payload) => Self::text(pretty(&payload)),
            Err(err) => Self::error(pretty(&serde_json::json!({
                "success": false,
                "error": err.to_string(),
            }))),
        }
    }

    /// Text of the first content block.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

fn pretty(value: &serde_json::Value) -> String {
    // Serializing a Value cannot fail: map keys are always strings.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
