//! Error hierarchy for Toolbridge.

use thiserror::Error;

/// Fixed message for a rejected token. The token itself never appears in it.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed: Invalid or expired JWT token";

/// Errors from the remote tool-provider API.
///
/// Catalog failures propagate to the local protocol as JSON-RPC errors; every
/// other variant is produced at invocation time and rendered in-band.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch tools from remote API: {message}")]
    CatalogFetch { message: String },

    #[error("{}", AUTHENTICATION_FAILED)]
    Authentication,

    #[error("Tool '{name}' not found on remote API")]
    ToolNotFound { name: String },

    #[error("Remote API error: {body}")]
    RemoteApi { status: u16, body: String },

    #[error("Failed to execute tool: {message}")]
    Transport { message: String },

    #[error("Failed to execute tool: Invalid response from remote API: missing data")]
    MalformedResponse,

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
