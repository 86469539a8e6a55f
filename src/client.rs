//! amoCRM API client.
//!
//! Low-level HTTP transport that handles authentication and raw requests.
//! Entity operations are implemented via traits on model types and only
//! see this client through the [`Requester`] capability.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AmoError, Result};
use crate::requester::{ApiRequest, ApiResponse, Requester};

/// Timeout applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("amocrm-rs/", env!("CARGO_PKG_VERSION"));

/// Low-level amoCRM API client.
///
/// Holds the account base URL (e.g. `https://example.amocrm.ru`) and a
/// long-lived bearer token. Neither value is validated.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool and may be shared freely between tasks.
///
/// # Example
///
/// ```no_run
/// use amocrm::AmoClient;
///
/// # fn example() -> amocrm::Result<()> {
/// // Create from environment variables
/// let client = AmoClient::from_env()?;
///
/// // Or configure manually
/// let client = AmoClient::new("https://example.amocrm.ru", "your-token")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AmoClient {
    http: Client,
    base_url: Arc<str>,
    api_key: Arc<str>,
}

impl std::fmt::Debug for AmoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmoClient")
            .field("base_url", &&*self.base_url)
            .finish_non_exhaustive()
    }
}

impl AmoClient {
    /// Create a client from environment variables.
    ///
    /// Uses `AMOCRM_BASE_URL` and `AMOCRM_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is not set.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("AMOCRM_BASE_URL").map_err(|_| {
            AmoError::ConfigMissing("AMOCRM_BASE_URL environment variable not set".to_string())
        })?;
        let api_key = env::var("AMOCRM_API_KEY").map_err(|_| {
            AmoError::ConfigMissing("AMOCRM_API_KEY environment variable not set".to_string())
        })?;

        Self::new(&base_url, &api_key)
    }

    /// Create a new client with the provided base URL and API key.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Ok(Self {
            http: build_http(DEFAULT_TIMEOUT)?,
            base_url: Arc::from(base_url),
            api_key: Arc::from(api_key),
        })
    }

    /// Replace the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = build_http(timeout)?;
        Ok(self)
    }
}

fn build_http(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .timeout(timeout)
        .build()
        .map_err(AmoError::Transport)
}

#[async_trait]
impl Requester for AmoClient {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn do_request(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers)
            .bearer_auth(&*self.api_key);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "amoCRM response");

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = AmoClient::new("https://example.amocrm.ru", "test-token").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("AmoClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_empty_configuration_accepted() {
        let client = AmoClient::new("", "").unwrap();
        assert_eq!(client.base_url(), "");
    }

    #[test]
    fn test_from_env_missing_key() {
        // Only checks the error variant; never sets the variables.
        if env::var("AMOCRM_BASE_URL").is_err() {
            let err = AmoClient::from_env().unwrap_err();
            assert!(matches!(err, AmoError::ConfigMissing(_)));
        }
    }
}
