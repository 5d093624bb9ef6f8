//! Keyforge Domain - Core compilation types
//!
//! This crate defines the data model of the configuration compiler:
//! parsed references, compilation inputs and results, and the trace tree.
//! All types here are pure Rust with no I/O dependencies.

pub mod compilation;
pub mod error;
pub mod reference;
pub mod settings;

pub use compilation::{
    CompilationResult, ConfigMap, Diagnostic, EnvironmentCompilationInfo, ResolutionIssue,
    Severity, StructureCompilationInfo, TraceNode, TraceResult,
};
pub use error::{DomainError, DomainResult};
pub use reference::{Namespace, Part, Reference, ReferenceCommand};
pub use settings::CompilerSettings;
