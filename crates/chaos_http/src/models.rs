//! Request and response models
//!
//! Transport-free shapes for the [`HttpSend`](crate::HttpSend) contract, so
//! the delayed client can wrap any sender, not just the bundled one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP request method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// HEAD
    Head,
}

impl HttpMethod {
    /// Wire name of the method
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Request method
    pub method: HttpMethod,
    /// Absolute URL
    pub url: String,
    /// Header name/value pairs, sent in order
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Request body, omitted when `None`
    #[serde(default)]
    pub body: Option<String>,
}

impl HttpRequest {
    /// Request with the given method and no headers or body
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// GET request for `url`
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// POST request for `url` carrying `body`
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        let mut request = Self::new(HttpMethod::Post, url);
        request.body = Some(body.into());
        request
    }

    /// Append one header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// One received response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Status code as sent by the server
    pub status: u16,
    /// Header name/value pairs in arrival order
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Response body as text
    #[serde(default)]
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
