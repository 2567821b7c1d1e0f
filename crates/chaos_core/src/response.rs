//! Handler response contract.
//!
//! Injectors treat responses opaquely except for the status field, reached
//! through [`StatusCarrier`]. [`HandlerResponse`] is the built-in carrier for
//! the common JSON handler shape.

use serde::{Deserialize, Serialize};

/// Read/write access to the status field of a response
pub trait StatusCarrier {
    /// Current status code
    fn status_code(&self) -> u16;

    /// Overwrite the status code, leaving every other field untouched
    fn set_status_code(&mut self, code: u16);
}

/// Minimal handler response: a status code, a body, and whatever else the
/// handler put in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerResponse {
    /// HTTP-style status code
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Response body, passed through untouched by every injector
    #[serde(default)]
    pub body: String,

    /// Additional fields, preserved verbatim across injection
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HandlerResponse {
    /// Response with the given status and body
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// 200 response with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

impl StatusCarrier for HandlerResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn set_status_code(&mut self, code: u16) {
        self.status_code = code;
    }
}
