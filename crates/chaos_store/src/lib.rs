//! Parameter-store backends for ChaosKit.
//!
//! Implementations of [`ParameterStorePort`](chaos_injection::ParameterStorePort)
//! over the places a fault-configuration document actually lives:
//!
//! - [`InMemoryParameterStore`]: a shared in-process map, for tests and
//!   single-binary deployments
//! - [`EnvParameterStore`]: environment variables
//! - [`HttpParameterStore`]: a remote key/value endpoint spoken to over HTTP
//!
//! Every backend is a plain key-to-document lookup; parsing and validation
//! stay with the resolver in `chaos_injection`.

pub mod env;
pub mod http;
pub mod memory;

pub use env::EnvParameterStore;
pub use http::{HttpParameterStore, HttpStoreConfig};
pub use memory::InMemoryParameterStore;
