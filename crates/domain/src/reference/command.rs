//! Reference commands and namespaces

use serde::{Deserialize, Serialize};

/// A command recognized inside a `{{...}}` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceCommand {
    /// Selects the namespace the path is looked up in.
    Using,
    /// Display name for tooling, ignored during resolution.
    Alias,
    /// The key to look up.
    Path,
}

impl ReferenceCommand {
    /// Matches a command name case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("using") {
            Some(Self::Using)
        } else if name.eq_ignore_ascii_case("alias") {
            Some(Self::Alias)
        } else if name.eq_ignore_ascii_case("path") {
            Some(Self::Path)
        } else {
            None
        }
    }
}

/// The key space a reference is resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// The environment map (default).
    Environment,
    /// The environment map, with the path taken relative to the parent of
    /// the path currently being resolved.
    This,
    /// The structure's variables.
    Structure,
    /// The external secret store.
    Secret,
    /// A `Using` value that names no known namespace.
    Unknown(String),
}

impl Namespace {
    /// Reserved `Using` value for sibling lookups.
    pub const THIS: &'static str = "$this";
    /// Reserved `Using` value for structure variables.
    pub const STRUCT: &'static str = "$struct";
    /// Reserved `Using` value for secrets.
    pub const SECRET: &'static str = "$secret";

    /// Interprets the value of a `Using` command.
    ///
    /// An empty value selects the environment.
    #[must_use]
    pub fn from_using(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            Self::Environment
        } else {
            Self::from_reserved(value).unwrap_or_else(|| Self::Unknown(value.to_string()))
        }
    }

    /// Splits a leading reserved segment off a path.
    ///
    /// ```
    /// use keyforge_domain::reference::Namespace;
    ///
    /// assert_eq!(
    ///     Namespace::split_path("$struct/db/name"),
    ///     Some((Namespace::Structure, "db/name"))
    /// );
    /// assert_eq!(Namespace::split_path("db/name"), None);
    /// ```
    #[must_use]
    pub fn split_path(path: &str) -> Option<(Self, &str)> {
        if !path.starts_with('$') {
            return None;
        }
        let (head, rest) = path.split_once('/')?;
        Self::from_reserved(head).map(|namespace| (namespace, rest))
    }

    fn from_reserved(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case(Self::THIS) {
            Some(Self::This)
        } else if value.eq_ignore_ascii_case(Self::STRUCT) {
            Some(Self::Structure)
        } else if value.eq_ignore_ascii_case(Self::SECRET) {
            Some(Self::Secret)
        } else {
            None
        }
    }

    /// Returns a short label used in trace output.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Environment => "environment",
            Self::This => Self::THIS,
            Self::Structure => Self::STRUCT,
            Self::Secret => Self::SECRET,
            Self::Unknown(name) => name,
        }
    }
}
