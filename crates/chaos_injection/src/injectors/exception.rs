//! Exception injection.
//!
//! Raises a configured failure in place of the wrapped handler. The decision
//! is made before the handler runs: on a fired call the handler is never
//! invoked, so no result is computed and thrown away.

use std::fmt;

use async_trait::async_trait;
use tracing::warn;

use chaos_core::{
    ChaosError, FaultErrorKind, FaultKind, FaultPayload, InjectedFault, InjectionGate,
};

use crate::handler::Handler;
use crate::resolver::ConfigResolver;

/// Wraps a handler with a probabilistically raised failure
pub struct ExceptionInjector<H> {
    inner: H,
    resolver: ConfigResolver,
    gate: InjectionGate,
    kind: FaultErrorKind,
    message_override: Option<String>,
    rate_override: Option<f64>,
}

impl<H> ExceptionInjector<H> {
    /// Wrap `inner`, pulling the message and rate from configuration on each call
    pub fn new(inner: H, resolver: ConfigResolver) -> Self {
        Self {
            inner,
            resolver,
            gate: InjectionGate::default(),
            kind: FaultErrorKind::default(),
            message_override: None,
            rate_override: None,
        }
    }

    /// Replace the probabilistic gate, usually with a deterministic source
    #[must_use]
    pub fn with_gate(mut self, gate: InjectionGate) -> Self {
        self.gate = gate;
        self
    }

    /// Failure category of the raised fault; generic when not set
    #[must_use]
    pub const fn with_error_kind(mut self, kind: FaultErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Fixed message, bypassing the document's `exception_msg` field
    ///
    /// The master switch and rate still come from the stored document unless
    /// [`with_rate`](Self::with_rate) is also set.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message_override = Some(message.into());
        self
    }

    /// Fixed rate, bypassing the document's `rate` field
    ///
    /// Combined with [`with_message`](Self::with_message) this removes the
    /// configuration fetch entirely.
    #[must_use]
    pub const fn with_rate(mut self, rate: f64) -> Self {
        self.rate_override = Some(rate);
        self
    }

    /// Decide what this call would raise; `None` means invoke unchanged
    async fn plan(&self) -> Result<Option<(InjectedFault, f64)>, ChaosError> {
        if let Some(message) = &self.message_override {
            let fault = InjectedFault::new(self.kind, message.clone());
            if let Some(rate) = self.rate_override {
                return Ok(Some((fault, rate)));
            }
            let doc = self.resolver.resolve_document().await?;
            if !doc.is_enabled {
                return Ok(None);
            }
            return Ok(Some((fault, doc.rate)));
        }

        let config = self.resolver.resolve(FaultKind::Exception).await?;
        if !config.enabled {
            return Ok(None);
        }
        let Some(FaultPayload::Exception(message)) = config.payload else {
            return Ok(None);
        };
        let rate = self.rate_override.unwrap_or(config.rate);
        Ok(Some((InjectedFault::new(self.kind, message), rate)))
    }
}

#[async_trait]
impl<H, Req> Handler<Req> for ExceptionInjector<H>
where
    H: Handler<Req>,
    H::Error: From<ChaosError> + From<InjectedFault>,
    Req: Send + 'static,
{
    type Response = H::Response;
    type Error = H::Error;

    async fn handle(&self, request: Req) -> Result<Self::Response, Self::Error> {
        if let Some((fault, rate)) = self.plan().await? {
            if self.gate.should_inject(rate) {
                warn!(
                    kind = ?fault.kind,
                    rate,
                    "Raising injected failure instead of the handler"
                );
                return Err(fault.into());
            }
        }
        self.inner.handle(request).await
    }
}

impl<H> fmt::Debug for ExceptionInjector<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionInjector")
            .field("resolver", &self.resolver)
            .field("kind", &self.kind)
            .field("message_override", &self.message_override)
            .field("rate_override", &self.rate_override)
            .finish_non_exhaustive()
    }
}
