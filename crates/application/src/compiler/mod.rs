//! Configuration compilation
//!
//! Parses `{{...}}` references inside structure values and expands them
//! against an environment into a flat configuration.
//!
//! # Usage
//!
//! ```
//! use keyforge_application::compiler::ConfigurationCompiler;
//! use keyforge_domain::{EnvironmentCompilationInfo, StructureCompilationInfo};
//!
//! let env = EnvironmentCompilationInfo::from_pairs(
//!     "development",
//!     [("logging/level", "debug"), ("logging/sink", "stdout")],
//! );
//! let structure = StructureCompilationInfo::from_pairs("api", [("Logging", "{{logging/*}}")]);
//!
//! let result = ConfigurationCompiler::new().compile(&env, &structure);
//! assert_eq!(result.get("Logging/level"), Some("debug"));
//! assert_eq!(result.get("Logging/sink"), Some("stdout"));
//! assert_eq!(result.get("Logging"), None);
//! ```

pub mod engine;
pub mod orchestrator;
pub mod parser;

pub use engine::{ResolutionContext, Resolved, SectionPairs};
pub use orchestrator::{ConfigurationCompiler, compile};
pub use parser::{ReferenceParser, ValueParser, extract_references, has_references, parse_value};
