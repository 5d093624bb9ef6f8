//! Keyforge Application - Configuration compilation engine
//!
//! This crate defines the application layer with:
//! - The value parser and resolution engine
//! - Port traits for external dependencies (secret lookup)
//! - Use cases for layered compilation and reference inspection
//! - Application-level error handling

pub mod compiler;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use compiler::{
    ConfigurationCompiler, ReferenceParser, ValueParser, compile, extract_references, parse_value,
};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{NoSecrets, SecretLookup};
pub use use_cases::{
    CompileConfiguration, CompileConfigurationInput, CompileConfigurationOutput,
    InspectReferences, ReferenceReport,
};
