//! Configuration module
//!
//! Handles CLI configuration including the catalog base URL and credentials.

use anyhow::{Result, anyhow};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the catalog instance
    pub base_url: String,
    /// API token for the token-authenticated catalog endpoints
    pub api_token: Option<String>,
}

impl Config {
    /// Returns the API token, failing with guidance when it is absent
    pub fn token(&self) -> Result<&str> {
        self.api_token
            .as_deref()
            .ok_or_else(|| anyhow!("API token required: set CATKIT_API_TOKEN or pass --api-token"))
    }
}
