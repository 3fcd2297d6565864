//! Test doubles shared by the adapter and session tests.

use std::sync::Mutex;
use std::time::Duration;

use serde_json::{Value, json};
use toolbridge_types::{
    ApiError, ProviderFuture, ToolArguments, ToolDescriptor, ToolProvider, default_input_schema,
};

type Responder = Box<dyn Fn(&str, &ToolArguments) -> Result<Value, ApiError> + Send + Sync>;

/// A provider with a fixed catalog and a scripted invocation result.
pub(crate) struct MockProvider {
    catalog: Option<Vec<ToolDescriptor>>,
    respond: Responder,
    delay: Duration,
    calls: Mutex<Vec<(String, ToolArguments)>>,
}

impl MockProvider {
    /// One `echo` tool that answers `{"success": true, "result": <arguments>}`.
    pub fn new() -> Self {
        Self {
            catalog: Some(vec![ToolDescriptor {
                name: "echo".into(),
                description: "Echo the input".into(),
                input_schema: default_input_schema(),
            }]),
            respond: Box::new(|_, args| Ok(json!({"success": true, "result": args}))),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_catalog_error(mut self) -> Self {
        self.catalog = None;
        self
    }

    pub fn with_responder(
        mut self,
        respond: impl Fn(&str, &ToolArguments) -> Result<Value, ApiError> + Send + Sync + 'static,
    ) -> Self {
        self.respond = Box::new(respond);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<(String, ToolArguments)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ToolProvider for MockProvider {
    fn list_tools(&self) -> ProviderFuture<'_, Vec<ToolDescriptor>> {
        Box::pin(async move {
            self.catalog.clone().ok_or_else(|| ApiError::CatalogFetch {
                message: "Request failed with status code 500".into(),
            })
        })
    }

    fn execute_tool<'a>(
        &'a self,
        name: &'a str,
        arguments: ToolArguments,
    ) -> ProviderFuture<'a, Value> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push((name.to_string(), arguments.clone()));
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            (self.respond)(name, &arguments)
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
