//! HTTP parameter store.
//!
//! Fetches the configuration document from a remote key/value endpoint, one
//! GET per lookup. This is the backend for hosted parameter services that
//! speak plain HTTP; there are no retries and no client-side caching, so
//! every wrapped invocation sees the live document.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use chaos_injection::{ParameterStorePort, StoreError};

/// HTTP store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpStoreConfig {
    /// Base URL of the key/value endpoint; the key is appended as one path segment
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

const fn default_timeout() -> u64 {
    10
}

impl HttpStoreConfig {
    /// Configuration for the given endpoint with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout(),
        }
    }

    /// Set the request timeout in seconds
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Parameter store over a remote HTTP key/value endpoint
#[derive(Debug, Clone)]
pub struct HttpParameterStore {
    client: Client,
    config: HttpStoreConfig,
}

impl HttpParameterStore {
    /// Create a store for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the HTTP client cannot be
    /// initialized.
    pub fn new(config: HttpStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::unavailable(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn key_url(&self, key: &str) -> String {
        format!("{}/{key}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ParameterStorePort for HttpParameterStore {
    #[instrument(skip(self))]
    async fn fetch(&self, key: &str) -> Result<String, StoreError> {
        let url = self.key_url(key);
        debug!(url = %url, "Fetching fault configuration");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::not_found(key));
        }
        if !status.is_success() {
            return Err(StoreError::unavailable(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = HttpStoreConfig::new("http://parameters.internal");
        assert_eq!(config.base_url, "http://parameters.internal");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_timeout_override() {
        let config = HttpStoreConfig::new("http://parameters.internal").with_timeout_secs(3);
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn config_deserializes_with_the_default_timeout() {
        let config: HttpStoreConfig =
            serde_json::from_str(r#"{"base_url": "http://parameters.internal"}"#).unwrap();
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn key_url_joins_with_one_slash() {
        let store = HttpParameterStore::new(HttpStoreConfig::new("http://host/kv/")).unwrap();
        assert_eq!(
            store.key_url("chaoslambda.config"),
            "http://host/kv/chaoslambda.config"
        );

        let store = HttpParameterStore::new(HttpStoreConfig::new("http://host/kv")).unwrap();
        assert_eq!(
            store.key_url("chaoslambda.config"),
            "http://host/kv/chaoslambda.config"
        );
    }
}
