//! Remote tool-provider API client.

use std::time::Duration;

use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use toolbridge_types::{ApiError, ToolArguments, ToolDescriptor};

use crate::catalog::parse_catalog;

/// Header carrying the access token on every request.
pub const TOKEN_HEADER: &str = "x-access-token";

/// Per-request timeout. Exceeding it is a transport failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the HTTP tool-provider API.
///
/// Holds only fixed configuration and a pooled reqwest client, so one
/// instance is shared across all invocations. Every call is attempted once.
#[derive(Clone)]
pub struct RemoteToolClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl RemoteToolClient {
    /// Create a client with the default 30 second timeout.
    pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(base_url: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Client(format!("Invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Client(format!(
                "Base URL '{base_url}' cannot carry a path"
            )));
        }

        let mut token_value = HeaderValue::from_str(token)
            .map_err(|_| ApiError::Client("Token contains invalid header characters".into()))?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, token_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        tracing::info!(base_url = %base_url, timeout_ms = timeout.as_millis() as u64, "Remote tool client initialized");

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// The base URL all tool paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the catalog from `GET <base>/tools`.
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ApiError> {
        tracing::info!("Fetching tools from remote API");
        let result = self.fetch_catalog().await;
        match &result {
            Ok(tools) => tracing::info!(count = tools.len(), "Tools fetched successfully"),
            Err(e) => tracing::error!("Failed to fetch tools: {e}"),
        }
        result
    }

    /// Invoke a tool with `POST <base>/tools/<name>`.
    pub async fn execute_tool(
        &self,
        name: &str,
        arguments: ToolArguments,
    ) -> Result<serde_json::Value, ApiError> {
        tracing::info!(tool = name, "Executing tool");
        tracing::debug!(tool = name, ?arguments, "Tool arguments");
        let result = self.post_tool(name, &arguments).await;
        match &result {
            Ok(payload) => tracing::info!(
                tool = name,
                success = ?payload.get("success"),
                "Tool executed successfully"
            ),
            Err(e) => tracing::error!(tool = name, "Tool execution failed: {e}"),
        }
        result
    }

    async fn fetch_catalog(&self) -> Result<Vec<ToolDescriptor>, ApiError> {
        let url = self.endpoint(&["tools"]);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| catalog_error(self.describe(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| catalog_error(self.describe(&e)))?;

        if !status.is_success() {
            return Err(catalog_error(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        parse_catalog(&body).map_err(catalog_error)
    }

    async fn post_tool(
        &self,
        name: &str,
        arguments: &ToolArguments,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(&["tools", name]);
        let response = self
            .http
            .post(url)
            .json(arguments)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), name, &body));
        }

        parse_payload(&body)
    }

    /// Append path segments to the base URL. Segments are percent-encoded, so
    /// a tool name can never escape the `/tools/` prefix.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor: the base URL always accepts segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn describe(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!("Request timed out after {}ms", self.timeout.as_millis())
        } else {
            err.to_string()
        }
    }

    fn transport_error(&self, err: &reqwest::Error) -> ApiError {
        ApiError::Transport {
            message: self.describe(err),
        }
    }
}

fn catalog_error(message: String) -> ApiError {
    ApiError::CatalogFetch { message }
}

/// Classify a non-success invocation response.
///
/// 401 and 404 map to fixed messages. Any other status carries the remote
/// error body re-serialized as compact JSON; with no body at all there is
/// nothing structured to report and the failure is a transport error.
pub fn classify_failure(status: u16, tool: &str, body: &str) -> ApiError {
    match (status, body.trim()) {
        (401, _) => ApiError::Authentication,
        (404, _) => ApiError::ToolNotFound {
            name: tool.to_string(),
        },
        (_, "") => ApiError::Transport {
            message: format!("Request failed with status code {status}"),
        },
        (_, text) => ApiError::RemoteApi {
            status,
            body: serialize_error_body(text),
        },
    }
}

fn serialize_error_body(text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
        .to_string()
}

/// Interpret a 2xx invocation body. Empty, `null` and `false` bodies carry no
/// data; a body that is not JSON is passed through as a string.
fn parse_payload(body: &str) -> Result<serde_json::Value, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::MalformedResponse);
    }
    let payload = serde_json::from_str(body)
        .unwrap_or_else(|_| serde_json::Value::String(body.to_string()));
    match payload {
        serde_json::Value::Null | serde_json::Value::Bool(false) => {
            Err(ApiError::MalformedResponse)
        }
        payload => Ok(payload),
    }
}
