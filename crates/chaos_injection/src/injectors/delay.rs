//! Delay injection.
//!
//! Suspends the call for a configured duration before the wrapped handler
//! runs. The handler runs exactly once whether or not the gate fires; the
//! delay only postpones it.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use chaos_core::{ChaosError, FaultKind, FaultPayload, InjectionGate};

use crate::handler::Handler;
use crate::resolver::ConfigResolver;

/// Wraps a handler with probabilistic added latency
pub struct DelayInjector<H> {
    inner: H,
    resolver: ConfigResolver,
    gate: InjectionGate,
    delay_override: Option<Duration>,
    rate_override: Option<f64>,
}

impl<H> DelayInjector<H> {
    /// Wrap `inner`, pulling the delay and rate from configuration on each call
    pub fn new(inner: H, resolver: ConfigResolver) -> Self {
        Self {
            inner,
            resolver,
            gate: InjectionGate::default(),
            delay_override: None,
            rate_override: None,
        }
    }

    /// Replace the probabilistic gate, usually with a deterministic source
    #[must_use]
    pub fn with_gate(mut self, gate: InjectionGate) -> Self {
        self.gate = gate;
        self
    }

    /// Fixed delay, bypassing the document's `delay` field
    ///
    /// Zero is meaningful here: the injection path still runs and the sleep
    /// lasts no time. The master switch and rate still come from the stored
    /// document unless [`with_rate`](Self::with_rate) is also set.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_override = Some(delay);
        self
    }

    /// Fixed rate, bypassing the document's `rate` field
    ///
    /// Combined with [`with_delay`](Self::with_delay) this removes the
    /// configuration fetch entirely.
    #[must_use]
    pub const fn with_rate(mut self, rate: f64) -> Self {
        self.rate_override = Some(rate);
        self
    }

    /// Decide what this call would inject; `None` means invoke unchanged
    async fn plan(&self) -> Result<Option<(Duration, f64)>, ChaosError> {
        if let Some(delay) = self.delay_override {
            if let Some(rate) = self.rate_override {
                return Ok(Some((delay, rate)));
            }
            let doc = self.resolver.resolve_document().await?;
            if !doc.is_enabled {
                return Ok(None);
            }
            return Ok(Some((delay, doc.rate)));
        }

        let config = self.resolver.resolve(FaultKind::Delay).await?;
        if !config.enabled {
            return Ok(None);
        }
        let Some(FaultPayload::Delay(millis)) = config.payload else {
            return Ok(None);
        };
        if millis <= 0 {
            // Stored zero or negative delay: nothing requested.
            return Ok(None);
        }
        let rate = self.rate_override.unwrap_or(config.rate);
        Ok(Some((Duration::from_millis(millis.unsigned_abs()), rate)))
    }
}

#[async_trait]
impl<H, Req> Handler<Req> for DelayInjector<H>
where
    H: Handler<Req>,
    H::Error: From<ChaosError>,
    Req: Send + 'static,
{
    type Response = H::Response;
    type Error = H::Error;

    #[allow(clippy::cast_possible_truncation)]
    async fn handle(&self, request: Req) -> Result<Self::Response, Self::Error> {
        let Some((delay, rate)) = self.plan().await? else {
            return self.inner.handle(request).await;
        };

        let start = Instant::now();
        if self.gate.should_inject(rate) {
            debug!(delay_ms = delay.as_millis() as u64, rate, "Injecting delay");
            tokio::time::sleep(delay).await;
        }
        debug!(
            added_ms = start.elapsed().as_millis() as u64,
            "Delay injection finished, invoking handler"
        );

        self.inner.handle(request).await
    }
}

impl<H> fmt::Debug for DelayInjector<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayInjector")
            .field("resolver", &self.resolver)
            .field("delay_override", &self.delay_override)
            .field("rate_override", &self.rate_override)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chaos_core::InjectionGate;

    use super::*;
    use crate::testing::{TestError, counting_handler, resolver_missing, resolver_with};

    #[tokio::test]
    async fn sleeps_then_invokes_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let injector = DelayInjector::new(
            counting_handler(&calls),
            resolver_with(r#"{"isEnabled": true, "rate": 1, "delay": 50}"#),
        );

        let start = Instant::now();
        let result = injector.handle(21).await;

        assert_eq!(result, Ok(42));
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ungated_call_invokes_without_sleeping() {
        let calls = Arc::new(AtomicUsize::new(0));
        let injector = DelayInjector::new(
            counting_handler(&calls),
            resolver_with(r#"{"isEnabled": true, "rate": 0.5, "delay": 200}"#),
        )
        .with_gate(InjectionGate::constant(0.9));

        let start = Instant::now();
        let result = injector.handle(21).await;

        assert_eq!(result, Ok(42));
        assert!(start.elapsed() < Duration::from_millis(100));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn disabled_document_invokes_unchanged() {
        let calls = Arc::new(AtomicUsize::new(0));
        let injector = DelayInjector::new(
            counting_handler(&calls),
            resolver_with(r#"{"isEnabled": false, "rate": 1, "delay": 200}"#),
        );

        let start = Instant::now();
        let result = injector.handle(21).await;

        assert_eq!(result, Ok(42));
        assert!(start.elapsed() < Duration::from_millis(100));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stored_zero_delay_means_nothing_requested() {
        let calls = Arc::new(AtomicUsize::new(0));
        let injector = DelayInjector::new(
            counting_handler(&calls),
            resolver_with(r#"{"isEnabled": true, "rate": 1, "delay": 0}"#),
        );

        let result = injector.handle(21).await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_delay_override_still_runs_the_injection_path() {
        // No `delay` field in the document: the override must keep the
        // payload lookup from happening at all.
        let calls = Arc::new(AtomicUsize::new(0));
        let injector = DelayInjector::new(
            counting_handler(&calls),
            resolver_with(r#"{"isEnabled": true, "rate": 1}"#),
        )
        .with_delay(Duration::ZERO);

        let result = injector.handle(21).await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delay_and_rate_overrides_skip_the_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let injector = DelayInjector::new(counting_handler(&calls), resolver_missing())
            .with_delay(Duration::from_millis(50))
            .with_rate(1.0);

        let start = Instant::now();
        let result = injector.handle(21).await;

        assert_eq!(result, Ok(42));
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delay_override_still_honors_the_master_switch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let injector = DelayInjector::new(
            counting_handler(&calls),
            resolver_with(r#"{"isEnabled": false, "rate": 1}"#),
        )
        .with_delay(Duration::from_millis(200));

        let start = Instant::now();
        let result = injector.handle(21).await;

        assert_eq!(result, Ok(42));
        assert!(start.elapsed() < Duration::from_millis(100));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_payload_field_propagates_and_skips_the_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let injector = DelayInjector::new(
            counting_handler(&calls),
            resolver_with(r#"{"isEnabled": true, "rate": 1}"#),
        );

        let result = injector.handle(21).await;

        assert!(matches!(result, Err(TestError::Config(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_document_propagates_and_skips_the_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let injector = DelayInjector::new(counting_handler(&calls), resolver_missing());

        let result = injector.handle(21).await;

        assert!(matches!(result, Err(TestError::Config(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn debug_shows_overrides_but_not_the_handler() {
        let injector = DelayInjector::new(
            counting_handler(&Arc::new(AtomicUsize::new(0))),
            resolver_with("{}"),
        )
        .with_delay(Duration::from_millis(10));

        let printed = format!("{injector:?}");
        assert!(printed.contains("delay_override"));
        assert!(printed.contains("10ms"));
    }
}
