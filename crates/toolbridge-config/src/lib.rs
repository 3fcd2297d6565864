//! Configuration for Toolbridge.
//!
//! Resolved once at startup with precedence:
//! CLI flags > environment variables > defaults

use std::path::PathBuf;

use toolbridge_types::ConfigError;

/// The default remote API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8005";

/// Environment variable holding the remote API base URL.
pub const API_URL_VAR: &str = "API_URL";

/// Environment variable holding the access token.
pub const TOKEN_VAR: &str = "JWT_TOKEN";

/// Environment variable holding the optional log file path.
pub const LOG_FILE_VAR: &str = "LOG_FILE";

/// Resolved configuration for a bridge process.
#[derive(Clone)]
pub struct BridgeConfig {
    pub api_url: String,
    pub token: String,
    pub log_file: Option<PathBuf>,
}

// The token stays out of Debug output so config can be logged safely.
impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// CLI overrides that take highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl BridgeConfig {
    /// Load configuration from CLI overrides and the process environment.
    pub fn load(overrides: CliOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve configuration against an arbitrary environment lookup.
    ///
    /// Empty values count as unset at every tier.
    pub fn resolve(
        overrides: CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let token = non_empty(overrides.token)
            .or_else(|| lookup(TOKEN_VAR))
            .ok_or_else(|| ConfigError::MissingKey {
                key: TOKEN_VAR.into(),
            })?;

        let api_url = non_empty(overrides.api_url)
            .or_else(|| lookup(API_URL_VAR))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let log_file = overrides
            .log_file
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| lookup(LOG_FILE_VAR).map(PathBuf::from));

        Ok(BridgeConfig {
            api_url,
            token,
            log_file,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
