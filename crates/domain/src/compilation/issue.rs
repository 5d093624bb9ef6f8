//! Diagnostics recorded while resolving references

use thiserror::Error;

/// How a [`ResolutionIssue`] is reported on its trace node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recorded under `warnings`.
    Warning,
    /// Recorded under `errors`.
    Error,
}

/// A problem found while resolving a value.
///
/// Issues never abort compilation: the affected reference resolves to an
/// empty string and the rendered message is attached to the trace.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionIssue {
    /// The referenced key does not exist.
    #[error("could not resolve '{path}' in {namespace}")]
    MissingKey {
        /// Namespace label.
        namespace: String,
        /// Path that was looked up.
        path: String,
    },

    /// The secret store has no value for the path.
    #[error("secret '{0}' not found")]
    MissingSecret(String),

    /// The reference carries no `Path` command.
    #[error("reference '{0}' has no path")]
    MissingPath(String),

    /// `Using` names an unknown namespace.
    #[error("unknown namespace '{namespace}' in reference '{reference}'")]
    UnknownNamespace {
        /// The `Using` value.
        namespace: String,
        /// Reference source text.
        reference: String,
    },

    /// The path is already being resolved further up the chain.
    #[error("cyclic reference to '{0}'")]
    CyclicReference(String),

    /// Nesting went deeper than the configured limit.
    #[error("reference '{path}' exceeds the maximum depth of {limit}")]
    DepthExceeded {
        /// Path that would have been entered.
        path: String,
        /// Configured limit.
        limit: usize,
    },

    /// A trailing `*` without `/`, matched as a bare prefix.
    #[error("'{0}' ends with '*' instead of '/*'; matched as a bare prefix")]
    MalformedWildcard(String),

    /// A trailing `*` without `/`, with the prefix fallback disabled.
    #[error("'{0}' ends with '*' instead of '/*'")]
    RejectedWildcard(String),

    /// A section reference matched nothing.
    #[error("section '{0}' matched no keys")]
    EmptySection(String),

    /// A section reference shares its value with other parts.
    #[error("section reference '{0}' must be the entire value")]
    SectionNotWholeValue(String),

    /// Sections cannot enumerate the secret store.
    #[error("section references are not supported for secrets: '{0}'")]
    SecretSection(String),

    /// An earlier key already produced this output path.
    #[error("'{0}' was already produced by another key; later value discarded")]
    KeyCollision(String),
}

impl ResolutionIssue {
    /// Returns where the issue is recorded.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::MissingPath(_) | Self::CyclicReference(_) | Self::DepthExceeded { .. } => {
                Severity::Error
            }
            _ => Severity::Warning,
        }
    }
}
