//! Port for the external fault-configuration store
//!
//! The store is a plain key-addressed document lookup. Implementations live
//! in `chaos_store` (in-memory, environment, HTTP); the resolver only ever
//! sees this contract.

use async_trait::async_trait;
use thiserror::Error;

/// Errors the store contract can surface
#[derive(Debug, Error)]
pub enum StoreError {
    /// No value stored under the key
    #[error("No value stored under '{key}'")]
    NotFound {
        /// Key that was looked up
        key: String,
    },

    /// Store could not be reached or answered abnormally
    #[error("Parameter store unavailable: {reason}")]
    Unavailable {
        /// What went wrong, for diagnostics
        reason: String,
    },
}

impl StoreError {
    /// Create a `NotFound` error
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create an `Unavailable` error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Port for fault-configuration lookups
///
/// Object-safe so the resolver can hold any backend behind `Arc<dyn _>`.
#[async_trait]
pub trait ParameterStorePort: Send + Sync {
    /// Fetch the raw configuration document stored under `key`
    ///
    /// Called once per wrapped invocation; implementations must not cache
    /// on the caller's behalf.
    async fn fetch(&self, key: &str) -> Result<String, StoreError>;
}
