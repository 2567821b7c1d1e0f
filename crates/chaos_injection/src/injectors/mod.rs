//! Handler decorators that corrupt invocations.
//!
//! Each injector wraps a [`Handler`](crate::Handler) and is itself a
//! [`Handler`](crate::Handler), so injectors stack by nesting. Every
//! injector fetches its configuration fresh on each call and propagates
//! resolution failures to the caller instead of silently standing aside.
//!
//! # Overview
//!
//! - [`DelayInjector`]: suspends the call before the handler runs. The
//!   handler always runs exactly once.
//! - [`ExceptionInjector`]: raises a configured failure instead of the
//!   handler. The handler is never invoked on a fired call.
//! - [`StatusCodeInjector`]: runs the handler first, then overwrites the
//!   status field of its response.
//!
//! # Example
//!
//! ```ignore
//! let resolver = ConfigResolver::new(store, "chaoslambda.config");
//!
//! let wrapped = StatusCodeInjector::new(
//!     DelayInjector::new(handler_fn(my_handler), resolver.clone()),
//!     resolver,
//! );
//!
//! let response = wrapped.handle(request).await?;
//! ```

mod delay;
mod exception;
mod status_code;

pub use delay::DelayInjector;
pub use exception::ExceptionInjector;
pub use status_code::StatusCodeInjector;
