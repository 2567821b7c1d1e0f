//! The wrapped-function seam.
//!
//! Injectors decorate anything implementing [`Handler`] and implement it
//! themselves, so composition is plain nesting. Plain async functions and
//! closures come in through [`handler_fn`], which adapts any
//! `Fn(Req) -> Future<Output = Result<_, _>>` without further ceremony.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;

/// One request-handling function
#[async_trait]
pub trait Handler<Req>: Send + Sync {
    /// Successful output
    type Response: Send;

    /// Failure type; injectors funnel their own failures through it
    type Error: Send;

    /// Process one request
    async fn handle(&self, request: Req) -> Result<Self::Response, Self::Error>;
}

/// Adapter turning an async function or closure into a [`Handler`]
///
/// Built with [`handler_fn`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap an async function or closure as a [`Handler`]
///
/// ```ignore
/// let handler = handler_fn(|event: Event| async move {
///     Ok::<_, AppError>(HandlerResponse::ok("Hello from Lambda!"))
/// });
/// ```
pub const fn handler_fn<F>(f: F) -> HandlerFn<F> {
    HandlerFn { f }
}

#[async_trait]
impl<F, Fut, Req, T, E> Handler<Req> for HandlerFn<F>
where
    F: Fn(Req) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    Req: Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Response = T;
    type Error = E;

    async fn handle(&self, request: Req) -> Result<T, E> {
        (self.f)(request).await
    }
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}
