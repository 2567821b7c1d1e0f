//! Fault model for ChaosKit.
//!
//! Core types shared by the injection middleware: fault kinds and their
//! configuration documents, the probabilistic gate with pluggable random
//! sources, the injected-failure types, and the response contract the
//! status injector mutates through.

pub mod error;
pub mod fault;
pub mod gate;
pub mod response;

pub use error::{ChaosError, FaultErrorKind, InjectedFault};
pub use fault::{FaultConfig, FaultDocument, FaultKind, FaultPayload};
pub use gate::{InjectionGate, RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use response::{HandlerResponse, StatusCarrier};
