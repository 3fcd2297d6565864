//! `ToolProvider` implementation backed by the remote HTTP API.

use crate::client::RemoteToolClient;
use toolbridge_types::{ProviderFuture, ToolArguments, ToolDescriptor, ToolProvider};

impl ToolProvider for RemoteToolClient {
    fn list_tools(&self) -> ProviderFuture<'_, Vec<ToolDescriptor>> {
        Box::pin(RemoteToolClient::list_tools(self))
    }

    fn execute_tool<'a>(
        &'a self,
        name: &'a str,
        arguments: ToolArguments,
    ) -> ProviderFuture<'a, serde_json::Value> {
        Box::pin(RemoteToolClient::execute_tool(self, name, arguments))
    }

    fn name(&self) -> &str {
        "remote"
    }
}
