//! Environment-based parameter store.
//!
//! Reads the configuration document from an environment variable. Useful
//! for containerized deployments where the document is injected at start;
//! note that a document frozen into the environment can only be changed by
//! restarting the process.

use std::env;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use chaos_injection::{ParameterStorePort, StoreError};

/// Parameter store that reads from environment variables
///
/// Keys are transformed to uppercase with slashes, hyphens, and dots
/// replaced by underscores. For example: "chaoslambda.config" becomes
/// "CHAOSLAMBDA_CONFIG".
#[derive(Debug, Clone, Default)]
pub struct EnvParameterStore {
    /// Optional prefix for all environment variable lookups
    prefix: Option<String>,
}

impl EnvParameterStore {
    /// Create a new environment parameter store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a prefix for all environment variable lookups
    ///
    /// # Example
    /// ```
    /// use chaos_store::EnvParameterStore;
    ///
    /// let store = EnvParameterStore::with_prefix("CHAOSKIT");
    /// // Looking up "chaoslambda.config" will check "CHAOSKIT_CHAOSLAMBDA_CONFIG"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Transform a key path to an environment variable name
    fn key_to_env_var(&self, key: &str) -> String {
        let normalized = key.replace(['/', '-', '.'], "_").to_uppercase();

        match &self.prefix {
            Some(prefix) => format!("{prefix}_{normalized}"),
            None => normalized,
        }
    }
}

#[async_trait]
impl ParameterStorePort for EnvParameterStore {
    #[instrument(skip(self), fields(env_var))]
    async fn fetch(&self, key: &str) -> Result<String, StoreError> {
        let env_var = self.key_to_env_var(key);
        tracing::Span::current().record("env_var", &env_var);

        match env::var(&env_var) {
            Ok(value) => {
                debug!("Read fault configuration from environment");
                Ok(value)
            }
            Err(env::VarError::NotPresent) => {
                warn!(env_var = %env_var, "No fault configuration in environment");
                Err(StoreError::not_found(key))
            }
            Err(env::VarError::NotUnicode(_)) => Err(StoreError::unavailable(format!(
                "environment variable {env_var} is not valid UTF-8"
            ))),
        }
    }
}
