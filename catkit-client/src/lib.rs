//! Catkit HTTP Client
//!
//! A simple, type-safe HTTP client for the catalog platform's APIs.
//!
//! Two auth surfaces exist side by side:
//! - [`CatalogClient`] covers the token-authenticated catalog endpoints
//!   (documents, bulk metadata jobs, catalog sets, sensitivity flags).
//! - [`DataProductClient`] covers the API-key-authenticated data product
//!   endpoints (cold start submission and task tracking).
//!
//! # Example
//!
//! ```no_run
//! use catkit_client::CatalogClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), catkit_client::ClientError> {
//!     let client = CatalogClient::new("https://catalog.example.com", "secret-token");
//!
//!     let doc = client.get_document(42).await?;
//!     println!("{doc}");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod poll;

mod catalog_set;
mod data_product;
mod documents;

// Re-export commonly used types
pub use data_product::DataProductClient;
pub use error::{ClientError, Result};
pub use poll::poll_until_terminal;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Per-request timeout applied to every call, status checks included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the default HTTP client with the shared request timeout.
///
/// Construction only fails when the TLS backend cannot initialize, in which
/// case no working client can be built at all.
pub(crate) fn default_http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("failed to build HTTP client")
}

/// HTTP client for token-authenticated catalog endpoints
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    /// Base URL of the catalog instance (e.g., "https://catalog.example.com")
    base_url: String,
    /// Static API token sent as the `Token` header on every request
    token: String,
    /// HTTP client instance
    client: Client,
}

impl CatalogClient {
    /// Create a new catalog client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the catalog instance
    /// * `token` - The API token for the `Token` header
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, default_http_client())
    }

    /// Create a new catalog client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the catalog instance
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize JSON
///
/// Checks the status code and returns an appropriate error if the request
/// failed, or deserializes the response body if successful.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Handle an API response where only the status code matters
pub(crate) async fn handle_empty_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CatalogClient::new("https://catalog.example.com", "t0k3n");
        assert_eq!(client.base_url(), "https://catalog.example.com");
        assert_eq!(client.token(), "t0k3n");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = CatalogClient::new("https://catalog.example.com/", "t0k3n");
        assert_eq!(client.base_url(), "https://catalog.example.com");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = CatalogClient::with_client("https://catalog.example.com", "t", http_client);
        assert_eq!(client.base_url(), "https://catalog.example.com");
    }
}
