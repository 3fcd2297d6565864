//! Protocol adapter: translates MCP requests into tool provider calls.
//!
//! Catalog failures surface as JSON-RPC errors. Invocation failures are
//! returned as ordinary results with `isError` set, so the calling agent
//! always gets data it can reason about instead of a broken session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use toolbridge_types::{ApiError, CallToolResult, ToolArguments, ToolDescriptor, ToolProvider};

use crate::jsonrpc::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, Incoming, JsonRpcRequest, JsonRpcResponse,
    METHOD_NOT_FOUND, PARSE_ERROR, parse_line,
};

/// Name advertised in `serverInfo`.
pub const SERVER_NAME: &str = "toolbridge";

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol versions we can speak, newest first.
const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05", "2024-10-07"];

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<ToolArguments>,
}

/// Result of `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ListToolsResult {
    pub tools: Vec<ToolDescriptor>,
}

/// Dispatches MCP requests to a [`ToolProvider`].
pub struct ProtocolAdapter {
    provider: Arc<dyn ToolProvider>,
}

impl ProtocolAdapter {
    pub fn new(provider: Arc<dyn ToolProvider>) -> Self {
        Self { provider }
    }

    /// Handle one line of client input. Returns `None` when nothing must be
    /// written back (notifications and stray responses).
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match parse_line(line) {
            Incoming::Request { id, request } => Some(self.handle_request(id, request).await),
            Incoming::Notification { method } => {
                tracing::debug!("Received notification {method}");
                None
            }
            Incoming::Response => {
                tracing::debug!("Ignoring response message from client");
                None
            }
            Incoming::Invalid { id, message } => {
                tracing::warn!("{message}");
                Some(JsonRpcResponse::error(id, INVALID_REQUEST, message))
            }
            Incoming::Unparseable { message } => {
                tracing::warn!("{message}");
                Some(JsonRpcResponse::error(Value::Null, PARSE_ERROR, message))
            }
        }
    }

    /// Handle a request that expects a response.
    pub async fn handle_request(&self, id: Value, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result(request.params.as_ref())),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => match self.list_tools().await {
                Ok(result) => respond(id, &result),
                Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            },
            "tools/call" => match parse_call_params(request.params) {
                Ok(params) => {
                    let result = self.call_tool(params).await;
                    respond(id, &result)
                }
                Err(message) => JsonRpcResponse::error(id, INVALID_PARAMS, message),
            },
            other => {
                tracing::warn!("Unknown method: {other}");
                JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}"))
            }
        }
    }

    /// Catalog handler. Failure is returned to the caller, never swallowed.
    pub async fn list_tools(&self) -> Result<ListToolsResult, ApiError> {
        tracing::info!(provider = self.provider.name(), "Handling ListTools request");
        let tools = self
            .provider
            .list_tools()
            .await
            .inspect_err(|e| tracing::error!("ListTools failed: {e}"))?;
        Ok(ListToolsResult { tools })
    }

    /// Invocation handler. Every outcome becomes a well-formed result.
    pub async fn call_tool(&self, params: CallToolParams) -> CallToolResult {
        let CallToolParams { name, arguments } = params;
        let arguments = arguments.unwrap_or_default();
        tracing::info!(tool = %name, "Handling CallTool request");

        let outcome = self.provider.execute_tool(&name, arguments).await;
        if let Err(e) = &outcome {
            tracing::error!(tool = %name, "CallTool failed: {e}");
        }
        CallToolResult::from_outcome(outcome)
    }
}

fn parse_call_params(params: Option<Value>) -> Result<CallToolParams, String> {
    let params = params.ok_or_else(|| "Invalid params: missing tool name".to_string())?;
    serde_json::from_value(params).map_err(|e| format!("Invalid params: {e}"))
}

fn respond<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization failed: {e}")),
    }
}

/// Build the `initialize` result, echoing the client's protocol version when
/// we support it and offering our newest one otherwise.
fn initialize_result(params: Option<&Value>) -> Value {
    let requested = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str);
    let version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]);

    if let Some(client) = params
        .and_then(|p| p.pointer("/clientInfo/name"))
        .and_then(Value::as_str)
    {
        tracing::info!(client, protocol_version = version, "Client initialized session");
    }

    json!({
        "protocolVersion": version,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}
