//! HTTP tool-provider API client for Toolbridge.

mod catalog;
mod client;
mod provider;

pub use client::{DEFAULT_TIMEOUT, RemoteToolClient, TOKEN_HEADER, classify_failure};
