//! Ports (interfaces) for external collaborators.

mod parameter_store;

pub use parameter_store::{ParameterStorePort, StoreError};
