//! Probabilistic gating for fault injection.
//!
//! Converts a configured rate into a per-call yes/no decision. The random
//! source behind the gate is a trait object, so tests can drive decisions
//! deterministically instead of relying on a hidden global generator.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform samples in [0, 1)
pub trait RandomSource: Send + Sync + fmt::Debug {
    /// Draw the next sample
    fn sample(&self) -> f64;
}

/// Thread-local generator, the production source
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn sample(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Seeded generator for reproducible runs
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Create a source seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn sample(&self) -> f64 {
        self.rng.lock().random::<f64>()
    }
}

/// Replays a fixed sequence of samples, wrapping around at the end
///
/// For tests that need exact gate decisions.
#[derive(Debug)]
pub struct SequenceRandom {
    samples: Vec<f64>,
    cursor: Mutex<usize>,
}

impl SequenceRandom {
    /// Create a source replaying `samples` in order
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        Self {
            samples: samples.into(),
            cursor: Mutex::new(0),
        }
    }

    /// A source that always returns the same sample
    pub fn constant(sample: f64) -> Self {
        Self::new([sample])
    }
}

impl RandomSource for SequenceRandom {
    fn sample(&self) -> f64 {
        let mut cursor = self.cursor.lock();
        let sample = self
            .samples
            .get(*cursor % self.samples.len().max(1))
            .copied()
            .unwrap_or_default();
        *cursor += 1;
        sample
    }
}

/// The per-call injection decision
#[derive(Debug, Clone)]
pub struct InjectionGate {
    source: Arc<dyn RandomSource>,
}

impl Default for InjectionGate {
    fn default() -> Self {
        Self {
            source: Arc::new(ThreadRandom),
        }
    }
}

impl InjectionGate {
    /// Gate backed by the given random source
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Gate backed by a seeded generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(Arc::new(SeededRandom::new(seed)))
    }

    /// Gate whose source always returns the same sample
    pub fn constant(sample: f64) -> Self {
        Self::new(Arc::new(SequenceRandom::constant(sample)))
    }

    /// Decide whether this invocation is corrupted
    ///
    /// Draws one uniform sample in [0, 1); injection fires iff
    /// `sample <= rate`. The bounds are exact: rate 0 never fires (even for
    /// a sample of exactly 0.0) and rate 1 always fires.
    pub fn should_inject(&self, rate: f64) -> bool {
        if rate <= 0.0 {
            return false;
        }
        if rate >= 1.0 {
            return true;
        }
        self.source.sample() <= rate
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn gate_with(samples: impl Into<Vec<f64>>) -> InjectionGate {
        InjectionGate::new(Arc::new(SequenceRandom::new(samples)))
    }

    #[test]
    fn rate_zero_never_fires() {
        // Even a sample of exactly 0.0 must not fire at rate 0.
        let gate = gate_with([0.0]);
        for _ in 0..10 {
            assert!(!gate.should_inject(0.0));
        }
    }

    #[test]
    fn rate_one_always_fires() {
        let gate = gate_with([0.999_999]);
        for _ in 0..10 {
            assert!(gate.should_inject(1.0));
        }
    }

    #[test]
    fn upper_bound_is_inclusive() {
        // Tie-break favors injection: sample == rate fires.
        let gate = gate_with([0.4]);
        assert!(gate.should_inject(0.4));
    }

    #[test]
    fn sample_above_rate_does_not_fire() {
        let gate = gate_with([0.400_001]);
        assert!(!gate.should_inject(0.4));
    }

    #[test]
    fn constant_gate_pins_the_sample() {
        let gate = InjectionGate::constant(0.3);
        assert!(gate.should_inject(0.3));
        assert!(!gate.should_inject(0.2));
    }

    #[test]
    fn sequence_replays_in_order_and_wraps() {
        let source = SequenceRandom::new([0.1, 0.9]);
        assert!((source.sample() - 0.1).abs() < f64::EPSILON);
        assert!((source.sample() - 0.9).abs() < f64::EPSILON);
        assert!((source.sample() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        for _ in 0..16 {
            assert!((a.sample() - b.sample()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn seeded_gate_decisions_are_reproducible() {
        let a = InjectionGate::seeded(7);
        let b = InjectionGate::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.should_inject(0.5), b.should_inject(0.5));
        }
    }

    #[test]
    fn thread_random_stays_in_unit_interval() {
        let source = ThreadRandom;
        for _ in 0..100 {
            let sample = source.sample();
            assert!((0.0..1.0).contains(&sample));
        }
    }

    proptest! {
        #[test]
        fn never_fires_at_rate_zero(sample in 0.0f64..1.0) {
            let gate = gate_with([sample]);
            prop_assert!(!gate.should_inject(0.0));
        }

        #[test]
        fn always_fires_at_rate_one(sample in 0.0f64..1.0) {
            let gate = gate_with([sample]);
            prop_assert!(gate.should_inject(1.0));
        }

        #[test]
        fn monotone_in_rate(sample in 0.0f64..1.0, lo in 0.0f64..=1.0, hi in 0.0f64..=1.0) {
            // For a fixed sample, raising the rate never turns a firing
            // decision off.
            let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
            let fired_low = gate_with([sample]).should_inject(lo);
            let fired_high = gate_with([sample]).should_inject(hi);
            prop_assert!(!fired_low || fired_high);
        }
    }
}
