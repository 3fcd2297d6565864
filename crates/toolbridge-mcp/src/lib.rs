//! MCP (Model Context Protocol) stdio server for Toolbridge.
//!
//! Reads newline-delimited JSON-RPC 2.0 requests from stdin, translates tool
//! listing and invocation into calls on a [`ToolProvider`], and writes the
//! responses to stdout. The [`Session`] owns the lifecycle from binding the
//! transport to closing it.
//!
//! [`ToolProvider`]: toolbridge_types::ToolProvider

pub mod adapter;
pub mod error;
pub mod jsonrpc;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{ProtocolAdapter, SERVER_NAME};
pub use error::McpError;
pub use session::{Session, SessionState, ShutdownReason};
pub use transport::StdioTransport;
