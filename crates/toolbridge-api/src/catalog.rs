//! Translation of the remote catalog into tool descriptors.

use serde::Deserialize;
use toolbridge_types::{ToolDescriptor, default_input_schema};

/// Body of `GET /tools`. `tools` is optional so its absence can be reported
/// separately from a body that is not JSON at all.
#[derive(Deserialize)]
pub(crate) struct CatalogResponse {
    #[serde(default)]
    pub tools: Option<Vec<RawToolRecord>>,
}

/// A tool record in the remote API's own shape.
#[derive(Deserialize)]
pub(crate) struct RawToolRecord {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<serde_json::Value>,
}

impl From<RawToolRecord> for ToolDescriptor {
    fn from(raw: RawToolRecord) -> Self {
        ToolDescriptor {
            name: raw.name,
            description: raw.description.unwrap_or_default(),
            input_schema: raw
                .parameters
                .filter(|p| !p.is_null())
                .unwrap_or_else(default_input_schema),
        }
    }
}

/// Parse a catalog body. `Err` carries the cause for `ApiError::CatalogFetch`.
pub(crate) fn parse_catalog(body: &str) -> Result<Vec<ToolDescriptor>, String> {
    let response: CatalogResponse = serde_json::from_str(body)
        .map_err(|e| format!("Invalid response from remote API: {e}"))?;
    let tools = response
        .tools
        .ok_or_else(|| "Invalid response from remote API: missing tools array".to_string())?;
    Ok(tools.into_iter().map(ToolDescriptor::from).collect())
}
