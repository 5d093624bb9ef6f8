//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the compiler and external systems.

mod secret_lookup;

pub use secret_lookup::{NoSecrets, SecretLookup};
