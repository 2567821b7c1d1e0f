//! Delayed HTTP client
//!
//! [`HttpSend`] is the minimal outbound contract; [`ReqwestSender`] is the
//! bundled implementation and [`DelayedHttpClient`] the latency-injecting
//! wrapper over any sender.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::models::{HttpMethod, HttpRequest, HttpResponse};

/// HTTP client errors
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// Client could not be initialized
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent or the response not read
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Minimal outbound HTTP contract
///
/// One method, so any transport can sit behind the delayed client.
#[async_trait]
pub trait HttpSend: Send + Sync {
    /// Send one request and collect the full response
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError>;
}

/// Bundled sender over a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: Client,
}

impl ReqwestSender {
    /// Sender with a default client
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::ConnectionFailed`] if the HTTP client
    /// cannot be initialized.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .build()
            .map_err(|e| HttpClientError::ConnectionFailed(e.to_string()))?;
        Ok(Self { client })
    }

    /// Sender over an existing client
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Head => reqwest::Method::HEAD,
    }
}

#[async_trait]
impl HttpSend for ReqwestSender {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Sender that pays a fixed delay before every request
///
/// The delay is unconditional: no stored document, no rate, no gate. The
/// request itself is forwarded untouched once the delay has elapsed.
#[derive(Debug, Clone)]
pub struct DelayedHttpClient<C> {
    inner: C,
    delay: Duration,
}

impl<C> DelayedHttpClient<C> {
    /// Wrap `inner`, delaying every send by `delay`
    pub const fn new(inner: C, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// The configured delay
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl DelayedHttpClient<ReqwestSender> {
    /// Delayed client over a default reqwest sender
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::ConnectionFailed`] if the HTTP client
    /// cannot be initialized.
    pub fn with_defaults(delay: Duration) -> Result<Self, HttpClientError> {
        Ok(Self::new(ReqwestSender::new()?, delay))
    }
}

#[async_trait]
impl<C> HttpSend for DelayedHttpClient<C>
where
    C: HttpSend,
{
    #[allow(clippy::cast_possible_truncation)]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        debug!(
            delay_ms = self.delay.as_millis() as u64,
            method = %request.method,
            "Adding delay to request"
        );
        tokio::time::sleep(self.delay).await;
        self.inner.send(request).await
    }
}
