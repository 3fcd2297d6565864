//! Error types for the MCP server session.

use crate::session::SessionState;
use thiserror::Error;

/// Errors from the local protocol session.
///
/// Tool failures never appear here: they are rendered into responses.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Session is {actual}, expected {expected}")]
    InvalidState {
        expected: SessionState,
        actual: SessionState,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
