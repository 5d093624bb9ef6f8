//! Parsed parts of a raw value

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::command::{Namespace, ReferenceCommand};
use crate::error::{DomainError, DomainResult};

/// Opening delimiter of a reference.
pub const OPEN: &str = "{{";
/// Closing delimiter of a reference.
pub const CLOSE: &str = "}}";
/// Suffix that turns a path into a section reference.
pub const SECTION_SUFFIX: &str = "/*";

/// One `{{...}}` occurrence inside a value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reference {
    /// Value of the `Using` command.
    pub using: Option<String>,

    /// Value of the `Alias` command.
    pub alias: Option<String>,

    /// Value of the `Path` command.
    pub path: Option<String>,

    /// Commands with names that are not recognized, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrecognized: Vec<(String, String)>,

    /// The verbatim text of the reference, delimiters included.
    pub source: String,
}

impl Reference {
    /// Builds a reference from the text between `{{` and `}}`.
    ///
    /// The body is split on `;` into tokens, each token on its first `:`
    /// into a command name and value. A token without `:` is a `Path`.
    /// When a command repeats, the last one wins.
    #[must_use]
    pub fn from_body(body: &str, source: impl Into<String>) -> Self {
        let mut reference = Self {
            source: source.into(),
            ..Self::default()
        };

        for token in body.split(';') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.split_once(':') {
                Some((name, value)) => reference.set_command(name.trim(), value.trim()),
                None => reference.path = Some(token.to_string()),
            }
        }

        reference
    }

    /// Creates a plain `{{path}}` reference.
    #[must_use]
    pub fn for_path(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            source: format!("{OPEN}{path}{CLOSE}"),
            path: Some(path),
            ..Self::default()
        }
    }

    fn set_command(&mut self, name: &str, value: &str) {
        let value = value.to_string();
        match ReferenceCommand::from_name(name) {
            Some(ReferenceCommand::Using) => self.using = Some(value),
            Some(ReferenceCommand::Alias) => self.alias = Some(value),
            Some(ReferenceCommand::Path) => self.path = Some(value),
            None => self.unrecognized.push((name.to_string(), value)),
        }
    }

    /// Returns the namespace and the path to look up in it.
    ///
    /// `Using` takes precedence. Without it, a leading reserved segment
    /// (`$this/`, `$struct/`, `$secret/`) selects the namespace.
    /// Returns `None` when the reference has no path.
    ///
    /// ```
    /// use keyforge_domain::reference::{Namespace, Reference};
    ///
    /// let reference = Reference::for_path("$this/D");
    /// assert_eq!(reference.target(), Some((Namespace::This, "D")));
    /// ```
    #[must_use]
    pub fn target(&self) -> Option<(Namespace, &str)> {
        let path = self.path.as_deref()?;
        if let Some(using) = self.using.as_deref() {
            return Some((Namespace::from_using(using), path));
        }
        Some(Namespace::split_path(path).unwrap_or((Namespace::Environment, path)))
    }

    /// Returns true if the path ends with `/*`.
    #[must_use]
    pub fn is_section(&self) -> bool {
        self.path
            .as_deref()
            .is_some_and(|path| path.ends_with(SECTION_SUFFIX))
    }

    /// Returns the alias if set, otherwise the path.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.alias
            .as_deref()
            .or(self.path.as_deref())
            .unwrap_or(&self.source)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Reference {
    type Err = DomainError;

    /// Parses a single reference strictly.
    ///
    /// Accepts either `{{...}}` or the bare body, and requires a path.
    fn from_str(s: &str) -> DomainResult<Self> {
        let trimmed = s.trim();
        let (body, source) = match trimmed
            .strip_prefix(OPEN)
            .and_then(|rest| rest.strip_suffix(CLOSE))
        {
            Some(body) => (body, trimmed.to_string()),
            None => (trimmed, format!("{OPEN}{trimmed}{CLOSE}")),
        };

        if body.contains(OPEN) || body.contains(CLOSE) {
            return Err(DomainError::InvalidReference(format!(
                "nested delimiters in '{s}'"
            )));
        }

        let reference = Self::from_body(body, source);
        match reference.path.as_deref() {
            Some(path) if !path.is_empty() => Ok(reference),
            _ => Err(DomainError::InvalidReference(format!(
                "no path in '{s}'"
            ))),
        }
    }
}

/// A literal span or a reference, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Part {
    /// Literal text.
    Value(String),
    /// An embedded reference.
    Reference(Reference),
}

impl Part {
    /// Returns the original text this part was parsed from.
    #[must_use]
    pub fn source_text(&self) -> &str {
        match self {
            Self::Value(text) => text,
            Self::Reference(reference) => &reference.source,
        }
    }

    /// Returns the reference if this part is one.
    #[must_use]
    pub const fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Value(_) => None,
            Self::Reference(reference) => Some(reference),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bare_body_is_path() {
        let reference = Reference::from_body("A/B", "{{A/B}}");
        assert_eq!(reference.path.as_deref(), Some("A/B"));
        assert_eq!(reference.using, None);
        assert_eq!(reference.target(), Some((Namespace::Environment, "A/B")));
    }

    #[test]
    fn test_commands_with_whitespace() {
        let reference = Reference::from_body(
            " Using : $struct ; Path : db/name ; Alias : Database ",
            "{{...}}",
        );
        assert_eq!(reference.using.as_deref(), Some("$struct"));
        assert_eq!(reference.path.as_deref(), Some("db/name"));
        assert_eq!(reference.alias.as_deref(), Some("Database"));
        assert_eq!(reference.target(), Some((Namespace::Structure, "db/name")));
        assert_eq!(reference.display_name(), "Database");
    }

    #[test]
    fn test_unrecognized_commands_are_kept() {
        let reference = Reference::from_body("Path:A;Format:upper", "{{Path:A;Format:upper}}");
        assert_eq!(
            reference.unrecognized,
            vec![("Format".to_string(), "upper".to_string())]
        );
        assert_eq!(reference.path.as_deref(), Some("A"));
    }

    #[test]
    fn test_value_split_on_first_colon() {
        let reference = Reference::from_body("Path:urls/http://host", "{{...}}");
        assert_eq!(reference.path.as_deref(), Some("urls/http://host"));
    }

    #[test]
    fn test_last_command_wins() {
        let reference = Reference::from_body("Path:A;Path:B;", "{{...}}");
        assert_eq!(reference.path.as_deref(), Some("B"));
    }

    #[test]
    fn test_using_overrides_path_prefix() {
        let reference = Reference::from_body("Using:$secret;Path:$this/x", "{{...}}");
        assert_eq!(reference.target(), Some((Namespace::Secret, "$this/x")));
    }

    #[test]
    fn test_no_path_has_no_target() {
        let reference = Reference::from_body("Using:$struct", "{{Using:$struct}}");
        assert_eq!(reference.target(), None);
        assert_eq!(reference.display_name(), "{{Using:$struct}}");
    }

    #[test]
    fn test_is_section() {
        assert!(Reference::for_path("A/*").is_section());
        assert!(!Reference::for_path("A*").is_section());
        assert!(!Reference::for_path("A").is_section());
    }

    #[test]
    fn test_from_str_strict() {
        let reference: Reference = "{{Using:$struct; Path:X}}".parse().unwrap();
        assert_eq!(reference.path.as_deref(), Some("X"));
        assert_eq!(reference.source, "{{Using:$struct; Path:X}}");

        let bare: Reference = "A/B".parse().unwrap();
        assert_eq!(bare.source, "{{A/B}}");

        assert!("{{Alias:Nothing}}".parse::<Reference>().is_err());
        assert!("{{}}".parse::<Reference>().is_err());
        assert!("{{A}}{{B}}".parse::<Reference>().is_err());
    }

    #[test]
    fn test_part_source_text() {
        let parts = [
            Part::Value("http://".to_string()),
            Part::Reference(Reference::for_path("host")),
        ];
        let text: String = parts.iter().map(Part::source_text).collect();
        assert_eq!(text, "http://{{host}}");
        assert!(parts[0].as_reference().is_none());
        assert!(parts[1].as_reference().is_some());
    }
}
