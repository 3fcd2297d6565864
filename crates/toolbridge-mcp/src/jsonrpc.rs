//! JSON-RPC 2.0 types for the server side of MCP communication.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// The method and params of an incoming request or notification.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// One line read from the client, classified.
#[derive(Debug)]
pub enum Incoming {
    /// Expects exactly one response carrying `id`.
    Request { id: Value, request: JsonRpcRequest },
    /// No `id`: must never be answered.
    Notification { method: String },
    /// A response to a request we never send. Ignored.
    Response,
    /// Valid JSON that is not a request.
    Invalid { id: Value, message: String },
    /// Not JSON at all.
    Unparseable { message: String },
}

/// Classify a line of input.
///
/// An `id` key that is present (even `null`) makes a request; an absent one
/// makes a notification.
pub fn parse_line(line: &str) -> Incoming {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            return Incoming::Unparseable {
                message: format!("Parse error: {e}"),
            };
        }
    };

    let Some(object) = value.as_object() else {
        return Incoming::Invalid {
            id: Value::Null,
            message: "Invalid Request: expected a JSON object".to_string(),
        };
    };

    let id = object.get("id").cloned();
    if !object.contains_key("method")
        && (object.contains_key("result") || object.contains_key("error"))
    {
        return Incoming::Response;
    }

    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            return Incoming::Invalid {
                id: id.unwrap_or(Value::Null),
                message: format!("Invalid Request: {e}"),
            };
        }
    };

    match id {
        Some(id) => Incoming::Request { id, request },
        None => Incoming::Notification {
            method: request.method,
        },
    }
}
