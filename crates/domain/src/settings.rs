//! Compiler settings
//!
//! Tunables for the resolution engine. Every field has a default so a
//! partial JSON document is enough.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Settings that adjust how references are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerSettings {
    /// Treat `{{A*}}` as a bare prefix match on `A`.
    ///
    /// Enabled by default to keep existing configurations compiling. When
    /// disabled, such references resolve to an empty string with a warning.
    pub legacy_wildcard_prefix: bool,

    /// Maximum nesting of reference resolution below a structure key.
    /// `None` means only cycle detection bounds the recursion.
    pub max_reference_depth: Option<usize>,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            legacy_wildcard_prefix: true,
            max_reference_depth: None,
        }
    }
}

impl CompilerSettings {
    /// Reads settings from a JSON document.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidSettings`] if the document is not valid
    /// JSON or a field has the wrong type, or if the depth limit is zero.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| DomainError::InvalidSettings(e.to_string()))?;
        if settings.max_reference_depth == Some(0) {
            return Err(DomainError::InvalidSettings(
                "maxReferenceDepth must be at least 1".to_string(),
            ));
        }
        Ok(settings)
    }

    /// Sets the maximum reference depth.
    #[must_use]
    pub const fn with_max_reference_depth(mut self, depth: usize) -> Self {
        self.max_reference_depth = Some(depth);
        self
    }

    /// Enables or disables the bare-prefix wildcard fallback.
    #[must_use]
    pub const fn with_legacy_wildcard_prefix(mut self, enabled: bool) -> Self {
        self.legacy_wildcard_prefix = enabled;
        self
    }
}
