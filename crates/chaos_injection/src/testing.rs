//! Shared fakes for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use chaos_core::{ChaosError, HandlerResponse, InjectedFault};

use crate::handler::{HandlerFn, handler_fn};
use crate::ports::{ParameterStorePort, StoreError};
use crate::resolver::ConfigResolver;

/// Store returning one fixed document for every key
#[derive(Debug)]
pub(crate) struct StaticStore {
    raw: String,
}

impl StaticStore {
    pub(crate) fn document(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

#[async_trait]
impl ParameterStorePort for StaticStore {
    async fn fetch(&self, _key: &str) -> Result<String, StoreError> {
        Ok(self.raw.clone())
    }
}

/// Store with nothing in it
#[derive(Debug)]
pub(crate) struct EmptyStore;

#[async_trait]
impl ParameterStorePort for EmptyStore {
    async fn fetch(&self, key: &str) -> Result<String, StoreError> {
        Err(StoreError::not_found(key))
    }
}

/// Store that always fails with a transport error
#[derive(Debug)]
pub(crate) struct DownStore;

#[async_trait]
impl ParameterStorePort for DownStore {
    async fn fetch(&self, _key: &str) -> Result<String, StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }
}

/// Store that counts how often it is read
#[derive(Debug)]
pub(crate) struct CountingStore {
    raw: String,
    fetches: Arc<AtomicUsize>,
}

impl CountingStore {
    pub(crate) fn document(raw: impl Into<String>) -> (Self, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        (
            Self {
                raw: raw.into(),
                fetches: Arc::clone(&fetches),
            },
            fetches,
        )
    }
}

#[async_trait]
impl ParameterStorePort for CountingStore {
    async fn fetch(&self, _key: &str) -> Result<String, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.raw.clone())
    }
}

/// Resolver over a fixed document
pub(crate) fn resolver_with(raw: &str) -> ConfigResolver {
    ConfigResolver::new(Arc::new(StaticStore::document(raw)), "chaos.test")
}

/// Resolver over an empty store
pub(crate) fn resolver_missing() -> ConfigResolver {
    ConfigResolver::new(Arc::new(EmptyStore), "chaos.test")
}

/// Future shape returned by boxed test handlers
pub(crate) type BoxedFuture<T> =
    std::pin::Pin<Box<dyn Future<Output = Result<T, TestError>> + Send>>;

/// Handler doubling its input and counting its invocations
pub(crate) fn counting_handler(
    calls: &Arc<AtomicUsize>,
) -> HandlerFn<impl Fn(u32) -> BoxedFuture<u32> + Send + Sync + use<>> {
    let calls = Arc::clone(calls);
    handler_fn(move |request: u32| -> BoxedFuture<u32> {
        let calls = Arc::clone(&calls);
        Box::pin(async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(request * 2)
        })
    })
}

/// Handler answering 200 with an extra passthrough field, counting its invocations
pub(crate) fn responding_handler(
    calls: &Arc<AtomicUsize>,
) -> HandlerFn<impl Fn(u32) -> BoxedFuture<HandlerResponse> + Send + Sync + use<>> {
    let calls = Arc::clone(calls);
    handler_fn(move |_: u32| -> BoxedFuture<HandlerResponse> {
        let calls = Arc::clone(&calls);
        Box::pin(async move {
            calls.fetch_add(1, Ordering::SeqCst);
            let mut response = HandlerResponse::ok("all good");
            response
                .extra
                .insert("isBase64Encoded".into(), serde_json::Value::Bool(false));
            Ok(response)
        })
    })
}

/// Error type standing in for a handler's own failure domain
#[derive(Debug, PartialEq)]
pub(crate) enum TestError {
    Config(String),
    Injected(InjectedFault),
    Handler(String),
}

impl From<ChaosError> for TestError {
    fn from(err: ChaosError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<InjectedFault> for TestError {
    fn from(fault: InjectedFault) -> Self {
        Self::Injected(fault)
    }
}
