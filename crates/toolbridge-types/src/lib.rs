//! Shared types and error hierarchy for Toolbridge.

pub mod error;
pub mod provider;
pub mod tool;

pub use error::{ApiError, ConfigError};
pub use provider::{ProviderFuture, ToolProvider};
pub use tool::*;
