//! Compilation trace tree
//!
//! The trace mirrors the resolution call tree. Every node shares the same
//! [`TraceNode`] fields; the variant says what the node describes.

use serde::{Deserialize, Serialize};

use super::issue::{ResolutionIssue, Severity};
use crate::reference::{Namespace, Reference};

/// Fields shared by every trace node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TraceNode {
    /// Key or path this node describes.
    pub key: String,

    /// Non-fatal diagnostics.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Diagnostics for references that could not be resolved at all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,

    /// Nested resolutions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TraceResult>,
}

impl TraceNode {
    /// Creates an empty node for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Records an issue under warnings or errors depending on its severity.
    pub fn record(&mut self, issue: &ResolutionIssue) {
        match issue.severity() {
            Severity::Warning => self.warnings.push(issue.to_string()),
            Severity::Error => self.errors.push(issue.to_string()),
        }
    }
}

/// One node of the compilation trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceResult {
    /// A literal value without references.
    Value {
        /// Shared fields.
        #[serde(flatten)]
        node: TraceNode,
        /// The literal value.
        value: Option<String>,
    },

    /// A single reference and what it resolved to.
    Key {
        /// Shared fields; `key` is the path looked up.
        #[serde(flatten)]
        node: TraceNode,
        /// The reference as written.
        reference: Reference,
        /// Namespace the path was looked up in.
        namespace: Namespace,
        /// Resolved value, `None` for sections.
        value: Option<String>,
    },

    /// A value made of several parts, or a section expansion.
    Multi {
        /// Shared fields.
        #[serde(flatten)]
        node: TraceNode,
        /// The raw value before resolution.
        original: Option<String>,
        /// The resolved value, `None` when the value expanded into keys.
        value: Option<String>,
        /// Output keys produced by section expansion.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        expanded: Vec<String>,
    },
}

impl TraceResult {
    /// Returns the shared fields.
    #[must_use]
    pub const fn node(&self) -> &TraceNode {
        match self {
            Self::Value { node, .. } | Self::Key { node, .. } | Self::Multi { node, .. } => node,
        }
    }

    /// Returns the shared fields mutably.
    pub const fn node_mut(&mut self) -> &mut TraceNode {
        match self {
            Self::Value { node, .. } | Self::Key { node, .. } | Self::Multi { node, .. } => node,
        }
    }

    /// Returns the node key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.node().key
    }

    /// Returns the node's own warnings.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.node().warnings
    }

    /// Returns the node's own errors.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.node().errors
    }

    /// Returns the child nodes.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.node().children
    }

    /// Returns true if this node or any descendant has a diagnostic.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        self.iter()
            .any(|n| !n.warnings().is_empty() || !n.errors().is_empty())
    }

    /// Iterates this node and its descendants depth-first.
    #[must_use]
    pub fn iter(&self) -> TraceIter<'_> {
        TraceIter { stack: vec![self] }
    }
}

/// Depth-first iterator over a trace subtree.
#[derive(Debug)]
pub struct TraceIter<'a> {
    stack: Vec<&'a TraceResult>,
}

impl<'a> Iterator for TraceIter<'a> {
    type Item = &'a TraceResult;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack.extend(current.children().iter().rev());
        Some(current)
    }
}
