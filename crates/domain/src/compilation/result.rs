//! Compilation output

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::info::ConfigMap;
use super::trace::TraceResult;
use crate::reference::Namespace;

/// A diagnostic message together with the trace key it was recorded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic<'a> {
    /// Key of the trace node holding the message.
    pub key: &'a str,
    /// The message.
    pub message: &'a str,
}

/// The result of compiling a structure against an environment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompilationResult {
    /// Fully resolved flat configuration.
    pub compiled_configuration: ConfigMap,

    /// One trace node per structure key, in compilation order.
    pub trace: Vec<TraceResult>,
}

impl CompilationResult {
    /// Returns a compiled value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.compiled_configuration.get(key).and_then(Option::as_deref)
    }

    /// Returns the top-level trace node for a structure key.
    #[must_use]
    pub fn trace_for(&self, key: &str) -> Option<&TraceResult> {
        self.trace.iter().find(|t| t.key() == key)
    }

    fn nodes(&self) -> impl Iterator<Item = &TraceResult> {
        self.trace.iter().flat_map(TraceResult::iter)
    }

    /// Returns every warning in the trace.
    #[must_use]
    pub fn warnings(&self) -> Vec<Diagnostic<'_>> {
        self.nodes()
            .flat_map(|n| {
                n.warnings().iter().map(move |message| Diagnostic {
                    key: n.key(),
                    message,
                })
            })
            .collect()
    }

    /// Returns every error in the trace.
    #[must_use]
    pub fn errors(&self) -> Vec<Diagnostic<'_>> {
        self.nodes()
            .flat_map(|n| {
                n.errors().iter().map(move |message| Diagnostic {
                    key: n.key(),
                    message,
                })
            })
            .collect()
    }

    /// Returns true if any trace node recorded an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.nodes().any(|n| !n.errors().is_empty())
    }

    /// Counts resolved references, nested ones included.
    #[must_use]
    pub fn reference_count(&self) -> usize {
        self.nodes()
            .filter(|n| matches!(n, TraceResult::Key { .. }))
            .count()
    }

    /// Returns the paths of `namespace` that references read successfully.
    #[must_use]
    pub fn used_keys(&self, namespace: &Namespace) -> BTreeSet<&str> {
        self.nodes()
            .filter_map(|n| match n {
                TraceResult::Key {
                    node,
                    namespace: ns,
                    ..
                } if ns == namespace && node.warnings.is_empty() && node.errors.is_empty() => {
                    Some(node.key.as_str())
                }
                _ => None,
            })
            .collect()
    }
}
