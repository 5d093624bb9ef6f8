//! Compilation inputs, outputs and trace types

mod info;
mod issue;
mod result;
mod trace;

pub use info::{ConfigMap, EnvironmentCompilationInfo, StructureCompilationInfo, to_config_map};
pub use issue::{ResolutionIssue, Severity};
pub use result::{CompilationResult, Diagnostic};
pub use trace::{TraceIter, TraceNode, TraceResult};
