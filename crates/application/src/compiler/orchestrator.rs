//! Configuration compiler
//!
//! Runs every structure key through the parser and the resolution engine
//! and merges the results into one flat map plus a trace.

use std::collections::btree_map::Entry;

use keyforge_domain::compilation::{
    CompilationResult, ConfigMap, EnvironmentCompilationInfo, ResolutionIssue,
    StructureCompilationInfo, TraceNode, TraceResult,
};
use keyforge_domain::reference::Part;
use keyforge_domain::settings::CompilerSettings;
use tracing::debug;

use super::engine::{ResolutionContext, Resolved};
use super::parser::{ReferenceParser, ValueParser};
use crate::ports::{NoSecrets, SecretLookup};

/// Compiles structures against environments.
///
/// # Examples
///
/// ```
/// use keyforge_application::compiler::ConfigurationCompiler;
/// use keyforge_domain::{EnvironmentCompilationInfo, StructureCompilationInfo};
///
/// let env = EnvironmentCompilationInfo::from_pairs("dev", [("db/host", "localhost")]);
/// let structure = StructureCompilationInfo::from_pairs(
///     "api",
///     [("Database/Url", "postgres://{{db/host}}/api")],
/// );
///
/// let result = ConfigurationCompiler::new().compile(&env, &structure);
/// assert_eq!(result.get("Database/Url"), Some("postgres://localhost/api"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigurationCompiler<P = ReferenceParser, S = NoSecrets> {
    parser: P,
    secrets: S,
    settings: CompilerSettings,
}

impl ConfigurationCompiler {
    /// Creates a compiler with the default parser and no secrets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P, S> ConfigurationCompiler<P, S> {
    /// Replaces the value parser.
    #[must_use]
    pub fn with_parser<Q: ValueParser>(self, parser: Q) -> ConfigurationCompiler<Q, S> {
        ConfigurationCompiler {
            parser,
            secrets: self.secrets,
            settings: self.settings,
        }
    }

    /// Replaces the secret source.
    #[must_use]
    pub fn with_secrets<T: SecretLookup>(self, secrets: T) -> ConfigurationCompiler<P, T> {
        ConfigurationCompiler {
            parser: self.parser,
            secrets,
            settings: self.settings,
        }
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: CompilerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the settings.
    #[must_use]
    pub const fn settings(&self) -> &CompilerSettings {
        &self.settings
    }
}

impl<P: ValueParser, S: SecretLookup> ConfigurationCompiler<P, S> {
    /// Compiles `structure` against `environment`.
    ///
    /// Never fails: unresolvable references become empty strings and are
    /// reported in the trace.
    #[must_use]
    pub fn compile(
        &self,
        environment: &EnvironmentCompilationInfo,
        structure: &StructureCompilationInfo,
    ) -> CompilationResult {
        compile_with(
            environment,
            structure,
            &self.parser,
            &self.secrets,
            &self.settings,
        )
    }
}

/// Compiles `structure` against `environment` with default settings.
#[must_use]
pub fn compile<P, S>(
    environment: &EnvironmentCompilationInfo,
    structure: &StructureCompilationInfo,
    parser: &P,
    secrets: &S,
) -> CompilationResult
where
    P: ValueParser + ?Sized,
    S: SecretLookup + ?Sized,
{
    compile_with(
        environment,
        structure,
        parser,
        secrets,
        &CompilerSettings::default(),
    )
}

fn compile_with<P, S>(
    environment: &EnvironmentCompilationInfo,
    structure: &StructureCompilationInfo,
    parser: &P,
    secrets: &S,
    settings: &CompilerSettings,
) -> CompilationResult
where
    P: ValueParser + ?Sized,
    S: SecretLookup + ?Sized,
{
    debug!(
        structure = %structure.name,
        environment = %environment.name,
        keys = structure.keys.len(),
        "compiling configuration"
    );

    let context = ResolutionContext::new(
        &environment.keys,
        &structure.keys,
        &structure.variables,
        parser,
        secrets,
        settings,
    );

    let mut compiled = ConfigMap::new();
    let mut trace = Vec::with_capacity(structure.keys.len());

    for (key, value) in &structure.keys {
        let parts = value
            .as_deref()
            .map(|text| parser.parse(text))
            .unwrap_or_default();

        let mut node = TraceNode::new(key.as_str());
        if !parts.iter().any(|part| matches!(part, Part::Reference(_))) {
            insert_first(&mut compiled, key.clone(), value.clone(), &mut node);
            trace.push(TraceResult::Value {
                node,
                value: value.clone(),
            });
            continue;
        }

        let node_trace = match context.resolve_parts_at(key, &parts, &mut node) {
            Resolved::Value(resolved) => {
                insert_first(&mut compiled, key.clone(), resolved.clone(), &mut node);
                TraceResult::Multi {
                    node,
                    original: value.clone(),
                    value: resolved,
                    expanded: Vec::new(),
                }
            }
            Resolved::Section(pairs) => {
                let mut expanded = Vec::with_capacity(pairs.len());
                for (suffix, resolved) in pairs {
                    let output_key = if suffix.is_empty() {
                        key.clone()
                    } else {
                        format!("{key}/{suffix}")
                    };
                    if insert_first(&mut compiled, output_key.clone(), resolved, &mut node) {
                        expanded.push(output_key);
                    }
                }
                TraceResult::Multi {
                    node,
                    original: value.clone(),
                    value: None,
                    expanded,
                }
            }
        };
        trace.push(node_trace);
    }

    let result = CompilationResult {
        compiled_configuration: compiled,
        trace,
    };

    debug!(
        structure = %structure.name,
        environment = %environment.name,
        keys = result.compiled_configuration.len(),
        references = result.reference_count(),
        warnings = result.warnings().len(),
        errors = result.errors().len(),
        "configuration compiled"
    );

    result
}

/// Inserts unless an earlier key already produced `key`.
fn insert_first(
    compiled: &mut ConfigMap,
    key: String,
    value: Option<String>,
    node: &mut TraceNode,
) -> bool {
    match compiled.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
        Entry::Occupied(slot) => {
            debug!(key = %slot.key(), "output key collision");
            node.record(&ResolutionIssue::KeyCollision(slot.key().clone()));
            false
        }
    }
}
