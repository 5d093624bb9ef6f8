//! Inspect references use case.
//!
//! Lists the references of a structure and whether each one resolves, so
//! tooling can point at dangling references without reading the trace.

use keyforge_domain::compilation::{
    CompilationResult, EnvironmentCompilationInfo, StructureCompilationInfo, TraceResult,
};
use keyforge_domain::reference::{Namespace, Reference};

use crate::compiler::{ConfigurationCompiler, ValueParser};
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::SecretLookup;

/// One reference found while compiling a structure key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceReport {
    /// Structure key the reference was reached from.
    pub structure_key: String,
    /// The reference as written.
    pub reference: Reference,
    /// Namespace the path was looked up in.
    pub namespace: Namespace,
    /// Path that was looked up.
    pub path: String,
    /// True if the lookup produced no diagnostics.
    pub resolved: bool,
    /// Warnings and errors recorded for this reference.
    pub diagnostics: Vec<String>,
}

/// Use case for listing references and dangling references.
pub struct InspectReferences<P, S> {
    compiler: ConfigurationCompiler<P, S>,
}

impl<P: ValueParser, S: SecretLookup> InspectReferences<P, S> {
    /// Creates the use case around a compiler.
    #[must_use]
    pub const fn new(compiler: ConfigurationCompiler<P, S>) -> Self {
        Self { compiler }
    }

    /// Lists every reference reached while compiling `structure`.
    #[must_use]
    pub fn execute(
        &self,
        environment: &EnvironmentCompilationInfo,
        structure: &StructureCompilationInfo,
    ) -> Vec<ReferenceReport> {
        let result = self.compiler.compile(environment, structure);
        reports(&result)
    }

    /// Lists the references reached from a single structure key.
    ///
    /// # Errors
    /// Returns [`ApplicationError::NotFound`] if the structure has no such key.
    pub fn execute_for_key(
        &self,
        environment: &EnvironmentCompilationInfo,
        structure: &StructureCompilationInfo,
        key: &str,
    ) -> ApplicationResult<Vec<ReferenceReport>> {
        if !structure.keys.contains_key(key) {
            return Err(ApplicationError::NotFound(format!(
                "structure '{}' has no key '{key}'",
                structure.name
            )));
        }
        Ok(self
            .execute(environment, structure)
            .into_iter()
            .filter(|report| report.structure_key == key)
            .collect())
    }

    /// Lists only the references that did not resolve cleanly.
    #[must_use]
    pub fn dangling(
        &self,
        environment: &EnvironmentCompilationInfo,
        structure: &StructureCompilationInfo,
    ) -> Vec<ReferenceReport> {
        self.execute(environment, structure)
            .into_iter()
            .filter(|report| !report.resolved)
            .collect()
    }
}

fn reports(result: &CompilationResult) -> Vec<ReferenceReport> {
    let mut reports = Vec::new();
    for root in &result.trace {
        for node in root.iter() {
            if let TraceResult::Key {
                node: shared,
                reference,
                namespace,
                ..
            } = node
            {
                let diagnostics: Vec<String> = shared
                    .warnings
                    .iter()
                    .chain(&shared.errors)
                    .cloned()
                    .collect();
                reports.push(ReferenceReport {
                    structure_key: root.key().to_string(),
                    reference: reference.clone(),
                    namespace: namespace.clone(),
                    path: shared.key.clone(),
                    resolved: diagnostics.is_empty(),
                    diagnostics,
                });
            }
        }
    }
    reports
}
