//! Status-code injection.
//!
//! Invokes the wrapped handler first, then overwrites the status field of
//! its response. Every other response field passes through untouched, and
//! whatever side effects the handler had stand.

use std::fmt;

use async_trait::async_trait;
use tracing::warn;

use chaos_core::{ChaosError, FaultKind, FaultPayload, InjectionGate, StatusCarrier};

use crate::handler::Handler;
use crate::resolver::ConfigResolver;

/// Wraps a handler with a probabilistic status-code overwrite
pub struct StatusCodeInjector<H> {
    inner: H,
    resolver: ConfigResolver,
    gate: InjectionGate,
    status_override: Option<u16>,
    rate_override: Option<f64>,
}

impl<H> StatusCodeInjector<H> {
    /// Wrap `inner`, pulling the code and rate from configuration on each call
    pub fn new(inner: H, resolver: ConfigResolver) -> Self {
        Self {
            inner,
            resolver,
            gate: InjectionGate::default(),
            status_override: None,
            rate_override: None,
        }
    }

    /// Replace the probabilistic gate, usually with a deterministic source
    #[must_use]
    pub fn with_gate(mut self, gate: InjectionGate) -> Self {
        self.gate = gate;
        self
    }

    /// Fixed replacement code, bypassing the document's `error_code` field
    ///
    /// The master switch and rate still come from the stored document unless
    /// [`with_rate`](Self::with_rate) is also set.
    #[must_use]
    pub const fn with_status_code(mut self, code: u16) -> Self {
        self.status_override = Some(code);
        self
    }

    /// Fixed rate, bypassing the document's `rate` field
    ///
    /// Combined with [`with_status_code`](Self::with_status_code) this
    /// removes the configuration fetch entirely.
    #[must_use]
    pub const fn with_rate(mut self, rate: f64) -> Self {
        self.rate_override = Some(rate);
        self
    }

    /// Decide what this call would overwrite; `None` means pass through
    async fn plan(&self) -> Result<Option<(u16, f64)>, ChaosError> {
        if let Some(code) = self.status_override {
            if let Some(rate) = self.rate_override {
                return Ok(Some((code, rate)));
            }
            let doc = self.resolver.resolve_document().await?;
            if !doc.is_enabled {
                return Ok(None);
            }
            return Ok(Some((code, doc.rate)));
        }

        let config = self.resolver.resolve(FaultKind::StatusCode).await?;
        if !config.enabled {
            return Ok(None);
        }
        let Some(FaultPayload::StatusCode(code)) = config.payload else {
            return Ok(None);
        };
        let rate = self.rate_override.unwrap_or(config.rate);
        Ok(Some((code, rate)))
    }
}

#[async_trait]
impl<H, Req> Handler<Req> for StatusCodeInjector<H>
where
    H: Handler<Req>,
    H::Response: StatusCarrier,
    H::Error: From<ChaosError>,
    Req: Send + 'static,
{
    type Response = H::Response;
    type Error = H::Error;

    async fn handle(&self, request: Req) -> Result<Self::Response, Self::Error> {
        // The handler always runs first; a handler failure wins over any
        // configuration problem this injector would have surfaced.
        let mut response = self.inner.handle(request).await?;

        if let Some((code, rate)) = self.plan().await? {
            if self.gate.should_inject(rate) {
                warn!(
                    original = response.status_code(),
                    injected = code,
                    rate,
                    "Overwriting response status"
                );
                response.set_status_code(code);
            }
        }
        Ok(response)
    }
}

impl<H> fmt::Debug for StatusCodeInjector<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusCodeInjector")
            .field("resolver", &self.resolver)
            .field("status_override", &self.status_override)
            .field("rate_override", &self.rate_override)
            .finish_non_exhaustive()
    }
}
