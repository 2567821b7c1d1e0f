//! Fault kinds and their configuration documents.
//!
//! A configuration document is a small JSON value fetched by key from an
//! external store. One document may carry payload fields for several fault
//! kinds at once; each resolution reads only the field for its kind.

use std::fmt;

use serde::Deserialize;

use crate::error::ChaosError;

/// The category of corruption a single injector applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Added latency before the handler runs
    Delay,
    /// A raised failure preempting the handler
    Exception,
    /// A status-code overwrite on the handler's response
    StatusCode,
}

impl FaultKind {
    /// Name of the document field carrying this kind's payload
    pub const fn field(self) -> &'static str {
        match self {
            Self::Delay => "delay",
            Self::Exception => "exception_msg",
            Self::StatusCode => "error_code",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Delay => "delay",
            Self::Exception => "exception",
            Self::StatusCode => "statusCode",
        };
        f.write_str(name)
    }
}

/// Raw configuration document, the stored JSON shape
///
/// Unknown fields are ignored so one document can serve injectors this
/// crate does not know about.
#[derive(Debug, Clone, Deserialize)]
pub struct FaultDocument {
    /// Master switch for every fault kind sourced from this document
    #[serde(rename = "isEnabled")]
    pub is_enabled: bool,

    /// Probability in [0, 1] that a single invocation is corrupted
    #[serde(default = "default_rate")]
    pub rate: f64,

    /// Milliseconds of latency for the delay kind
    #[serde(default)]
    pub delay: Option<i64>,

    /// Message for the exception kind
    #[serde(default)]
    pub exception_msg: Option<String>,

    /// Replacement status code for the statusCode kind
    #[serde(default)]
    pub error_code: Option<u16>,
}

const fn default_rate() -> f64 {
    1.0
}

impl FaultDocument {
    /// Parse a raw store value and validate the rate bounds
    ///
    /// The literal rate is checked even when the document is disabled; a
    /// malformed document is a configuration error regardless of the switch.
    pub fn parse(raw: &str) -> Result<Self, ChaosError> {
        let doc: Self = serde_json::from_str(raw)?;
        if !(0.0..=1.0).contains(&doc.rate) {
            return Err(ChaosError::invalid_rate(doc.rate));
        }
        Ok(doc)
    }

    /// Normalize this document into the per-kind view one injector consumes
    ///
    /// A disabled document suppresses the payload and forces the effective
    /// rate to 0 for every kind. An enabled document without the requested
    /// kind's field is a `ConfigKeyMissing` error, never a silent no-op.
    pub fn resolve(&self, kind: FaultKind) -> Result<FaultConfig, ChaosError> {
        if !self.is_enabled {
            return Ok(FaultConfig::disabled());
        }

        let payload = match kind {
            FaultKind::Delay => self.delay.map(FaultPayload::Delay),
            FaultKind::Exception => self.exception_msg.clone().map(FaultPayload::Exception),
            FaultKind::StatusCode => self.error_code.map(FaultPayload::StatusCode),
        }
        .ok_or(ChaosError::key_missing(kind))?;

        Ok(FaultConfig {
            enabled: true,
            rate: self.rate,
            payload: Some(payload),
        })
    }
}

/// Kind-specific payload resolved from a document
#[derive(Debug, Clone, PartialEq)]
pub enum FaultPayload {
    /// Latency to add, in milliseconds; non-positive means "no injection requested"
    Delay(i64),
    /// Message for the injected failure
    Exception(String),
    /// Replacement status code
    StatusCode(u16),
}

/// Normalized per-kind view of a configuration document
///
/// Fetched fresh for every invocation, consumed once, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultConfig {
    /// Whether injection may act at all
    pub enabled: bool,
    /// Effective injection probability; 0 when disabled
    pub rate: f64,
    /// Kind payload; suppressed when the document is disabled
    pub payload: Option<FaultPayload>,
}

impl FaultConfig {
    /// The view of a disabled document: nothing fires, payload suppressed
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            rate: 0.0,
            payload: None,
        }
    }
}
