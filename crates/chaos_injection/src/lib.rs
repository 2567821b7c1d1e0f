//! Fault-injection middleware for request handlers.
//!
//! Wraps an arbitrary async handler and, driven by a configuration document
//! fetched from an external store on every call, probabilistically corrupts
//! its behavior: added latency, a raised failure, or an overwritten response
//! status.
//!
//! # Overview
//!
//! - [`Handler`]: the wrapped-function seam; [`handler_fn`] adapts plain
//!   async functions and closures
//! - [`ConfigResolver`]: fetches and normalizes the fault configuration for
//!   one fault kind per call
//! - [`DelayInjector`] / [`ExceptionInjector`] / [`StatusCodeInjector`]: the
//!   three decorators, each a [`Handler`] over any inner [`Handler`]
//! - [`ParameterStorePort`]: the key/value contract of the external store
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use chaos_injection::{ConfigResolver, DelayInjector, Handler, handler_fn};
//! use chaos_store::InMemoryParameterStore;
//!
//! let store = Arc::new(InMemoryParameterStore::new());
//! let resolver = ConfigResolver::new(store, "chaoslambda.config");
//!
//! // Wrap a handler; every call fetches the document and maybe sleeps.
//! let wrapped = DelayInjector::new(handler_fn(my_handler), resolver);
//! let response = wrapped.handle(event).await?;
//! ```

pub mod handler;
pub mod injectors;
pub mod ports;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use handler::{Handler, HandlerFn, handler_fn};
pub use injectors::{DelayInjector, ExceptionInjector, StatusCodeInjector};
pub use ports::{ParameterStorePort, StoreError};
pub use resolver::{CHAOS_PARAM_VAR, ConfigResolver};
