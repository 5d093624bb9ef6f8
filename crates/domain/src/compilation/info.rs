//! Compilation inputs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A flat map of `/`-separated paths to nullable values.
pub type ConfigMap = BTreeMap<String, Option<String>>;

/// Snapshot of an environment handed to the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentCompilationInfo {
    /// Environment name.
    pub name: String,

    /// Flattened environment keys.
    #[serde(default)]
    pub keys: ConfigMap,
}

impl EnvironmentCompilationInfo {
    /// Creates an environment snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, keys: ConfigMap) -> Self {
        Self {
            name: name.into(),
            keys,
        }
    }

    /// Creates an environment snapshot from non-null pairs.
    #[must_use]
    pub fn from_pairs<K, V>(name: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(name, to_config_map(pairs))
    }

    /// Returns a copy of this environment with `overrides` laid over it.
    #[must_use]
    pub fn overlay(&self, name: impl Into<String>, overrides: &ConfigMap) -> Self {
        let mut keys = self.keys.clone();
        keys.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self::new(name, keys)
    }
}

/// Snapshot of a structure handed to the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructureCompilationInfo {
    /// Structure name.
    pub name: String,

    /// Template keys, possibly containing references.
    #[serde(default)]
    pub keys: ConfigMap,

    /// Structure-local variables, reachable through `$struct`.
    #[serde(default)]
    pub variables: ConfigMap,
}

impl StructureCompilationInfo {
    /// Creates a structure snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, keys: ConfigMap, variables: ConfigMap) -> Self {
        Self {
            name: name.into(),
            keys,
            variables,
        }
    }

    /// Creates a structure snapshot without variables from non-null pairs.
    #[must_use]
    pub fn from_pairs<K, V>(name: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(name, to_config_map(pairs), ConfigMap::new())
    }

    /// Sets the structure variables.
    #[must_use]
    pub fn with_variables(mut self, variables: ConfigMap) -> Self {
        self.variables = variables;
        self
    }
}

/// Builds a [`ConfigMap`] from non-null pairs.
#[must_use]
pub fn to_config_map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> ConfigMap
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), Some(v.into())))
        .collect()
}
