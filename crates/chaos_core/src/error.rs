//! Error types for fault resolution and injection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fault::FaultKind;

/// Errors raised while resolving fault configuration
///
/// Resolution is fail-closed: every variant propagates to the caller of the
/// wrapping injector instead of silently disabling injection.
#[derive(Debug, Error)]
pub enum ChaosError {
    /// No configuration document at the given key, or the store was unreachable
    #[error("No fault configuration at '{key}': {reason}")]
    ConfigNotFound {
        /// Store key the resolver looked up
        key: String,
        /// What the store reported
        reason: String,
    },

    /// Document present but carries no entry for the requested fault kind
    #[error("Fault configuration has no '{field}' entry for kind '{kind}'")]
    ConfigKeyMissing {
        /// Fault kind that was being resolved
        kind: FaultKind,
        /// Document field that was expected
        field: &'static str,
    },

    /// The configured rate is outside the closed interval [0, 1]
    #[error("Injection rate {rate} is outside [0, 1]")]
    InvalidRate {
        /// The offending literal value
        rate: f64,
    },

    /// The raw store value did not parse as a configuration document
    #[error("Malformed fault configuration: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// The environment variable naming the configuration key is not set
    #[error("Environment variable '{variable}' is not set")]
    MissingParameterName {
        /// Name of the variable that was looked up
        variable: &'static str,
    },
}

impl ChaosError {
    /// Create a `ConfigNotFound` error
    pub fn not_found(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigNotFound {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a `ConfigKeyMissing` error for the given fault kind
    pub const fn key_missing(kind: FaultKind) -> Self {
        Self::ConfigKeyMissing {
            kind,
            field: kind.field(),
        }
    }

    /// Create an `InvalidRate` error
    pub const fn invalid_rate(rate: f64) -> Self {
        Self::InvalidRate { rate }
    }
}

/// Category of a deliberately injected failure
///
/// A closed set of failure shapes the exception injector can produce,
/// selectable per injector through an override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultErrorKind {
    /// Unspecific failure, used when no kind is configured
    #[default]
    Generic,
    /// Equivalent of an invalid-argument failure
    InvalidInput,
    /// Simulated upstream timeout
    Timeout,
    /// Simulated dependency outage
    Unavailable,
}

/// A deliberately raised failure standing in for a real application error
///
/// Converts into the wrapped handler's own error type via `From`, so the
/// outer runtime cannot tell it apart from a naturally occurring failure.
/// `Display` shows only the message for the same reason.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InjectedFault {
    /// Failure category
    pub kind: FaultErrorKind,
    /// Human-readable message, usually sourced from configuration
    pub message: String,
}

impl InjectedFault {
    /// Create a fault of the given kind
    pub fn new(kind: FaultErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a generic fault
    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(FaultErrorKind::Generic, message)
    }
}
