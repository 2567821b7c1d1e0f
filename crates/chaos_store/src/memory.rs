//! In-memory parameter store.
//!
//! A process-local map behind a read/write lock. The injectors fetch on
//! every call, so swapping the stored document between calls changes
//! behavior immediately, which makes this the natural backend for tests
//! and demo wiring.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use chaos_injection::{ParameterStorePort, StoreError};

/// Parameter store backed by a shared in-process map
///
/// Clones share the underlying map, so one handle can feed the resolver
/// while another mutates the stored documents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryParameterStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryParameterStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value
    pub async fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().await.insert(key.into(), value.into());
    }

    /// Remove the value under `key`
    pub async fn remove(&self, key: &str) {
        self.values.write().await.remove(key);
    }
}

#[async_trait]
impl ParameterStorePort for InMemoryParameterStore {
    async fn fetch(&self, key: &str) -> Result<String, StoreError> {
        self.values
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))
    }
}
