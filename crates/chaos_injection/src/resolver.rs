//! Configuration resolution.
//!
//! Fetches the raw document from the parameter store, parses it, and
//! narrows it to the view a single injector consumes. Resolution happens on
//! every wrapped invocation so that flipping the stored document takes
//! effect immediately; nothing is cached here.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, instrument};

use chaos_core::{ChaosError, FaultConfig, FaultDocument, FaultKind};

use crate::ports::ParameterStorePort;

/// Environment variable naming the store key of the configuration document
pub const CHAOS_PARAM_VAR: &str = "CHAOS_PARAM";

/// Snapshot of `CHAOS_PARAM`, taken at most once per process
static PARAMETER_KEY: OnceLock<Option<String>> = OnceLock::new();

/// Resolves fault configuration from an external store
///
/// Holds the store handle and the document key explicitly. Ambient process
/// state is only consulted through [`ConfigResolver::from_env`], and even
/// then only on the first call.
#[derive(Clone)]
pub struct ConfigResolver {
    store: Arc<dyn ParameterStorePort>,
    key: String,
}

impl ConfigResolver {
    /// Resolver reading the document stored under `key`
    pub fn new(store: Arc<dyn ParameterStorePort>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Resolver with the key taken from the `CHAOS_PARAM` variable
    ///
    /// The variable is read once per process and the value is reused for
    /// every resolver built afterwards; later changes to the environment
    /// are not observed.
    ///
    /// # Errors
    ///
    /// Returns [`ChaosError::MissingParameterName`] when the variable was
    /// not set at first read.
    pub fn from_env(store: Arc<dyn ParameterStorePort>) -> Result<Self, ChaosError> {
        let key = PARAMETER_KEY
            .get_or_init(|| std::env::var(CHAOS_PARAM_VAR).ok())
            .clone()
            .ok_or(ChaosError::MissingParameterName {
                variable: CHAOS_PARAM_VAR,
            })?;
        Ok(Self::new(store, key))
    }

    /// The store key this resolver reads
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fetch and parse the document without selecting a fault kind
    ///
    /// Used when an explicit payload override only needs the master switch
    /// and the rate. The rate literal is still validated.
    ///
    /// # Errors
    ///
    /// Returns [`ChaosError::ConfigNotFound`] when the store has no value
    /// under the key or cannot be reached, [`ChaosError::MalformedDocument`]
    /// when the value does not parse, and [`ChaosError::InvalidRate`] when
    /// the rate is outside `[0, 1]`.
    pub async fn resolve_document(&self) -> Result<FaultDocument, ChaosError> {
        let raw = self
            .store
            .fetch(&self.key)
            .await
            .map_err(|err| ChaosError::not_found(&self.key, err.to_string()))?;
        FaultDocument::parse(&raw)
    }

    /// Resolve the configuration for one fault kind
    ///
    /// Fetches fresh from the store on every call. A missing document, a
    /// malformed document, a missing kind field on an enabled document, or
    /// an out-of-range rate all surface as errors rather than as a silent
    /// no-injection outcome.
    ///
    /// # Errors
    ///
    /// Everything [`ConfigResolver::resolve_document`] returns, plus
    /// [`ChaosError::ConfigKeyMissing`] when the document is enabled but
    /// carries no entry for `kind`.
    #[instrument(skip(self), fields(key = %self.key, kind = %kind))]
    pub async fn resolve(&self, kind: FaultKind) -> Result<FaultConfig, ChaosError> {
        let config = self.resolve_document().await?.resolve(kind)?;
        debug!(
            enabled = config.enabled,
            rate = config.rate,
            "Resolved fault configuration"
        );
        Ok(config)
    }
}

impl fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
