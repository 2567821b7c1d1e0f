//! HTTP client with built-in delay injection.
//!
//! The sibling of the handler-wrapping injectors for outbound traffic: a
//! client that adds a fixed delay before every request it sends. Unlike the
//! handler decorators, the delay here is unconditional; there is no stored
//! document, no rate, and no gate. Construct it with the latency you want
//! and every call pays it.

pub mod client;
mod models;

pub use client::{DelayedHttpClient, HttpClientError, HttpSend, ReqwestSender};
pub use models::{HttpMethod, HttpRequest, HttpResponse};
