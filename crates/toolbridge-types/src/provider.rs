//! Provider trait for remote tool hosts.

use crate::{ApiError, ToolArguments, ToolDescriptor};
use std::future::Future;
use std::pin::Pin;

/// A boxed future returned by [`ToolProvider`] methods.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// A source of tools that the local protocol can list and invoke.
///
/// Dyn-compatible so the protocol adapter works with `Arc<dyn ToolProvider>`.
/// Implementations hold no per-call state and are shared without locking.
pub trait ToolProvider: Send + Sync {
    /// Fetch the tool catalog, preserving the remote order.
    fn list_tools(&self) -> ProviderFuture<'_, Vec<ToolDescriptor>>;

    /// Invoke a tool by its catalog name and return the raw result payload.
    fn execute_tool<'a>(
        &'a self,
        name: &'a str,
        arguments: ToolArguments,
    ) -> ProviderFuture<'a, serde_json::Value>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}
