//! Reference resolution engine
//!
//! Expands references against the environment, the structure variables and
//! the secret store. Resolution is recursive: a referenced value that itself
//! contains references is resolved in turn, with the path of that value as
//! the new current path.
//!
//! Termination is guaranteed by the frame stack. Every nested resolution
//! and every section expansion pushes `(key space, path)` onto a stack that
//! lives on the call stack and is only visible to its own descendants.
//! Entering a path or section that is already on the stack stops that branch
//! with an empty string and an error on the trace, so depth is bounded by
//! the number of distinct reachable paths.

use std::borrow::Cow;
use std::ops::Bound;

use keyforge_domain::compilation::{ConfigMap, ResolutionIssue, TraceNode, TraceResult};
use keyforge_domain::reference::{Namespace, Part, Reference, SECTION_SUFFIX};
use keyforge_domain::settings::CompilerSettings;
use tracing::{debug, trace};

use super::parser::ValueParser;
use crate::ports::SecretLookup;

/// Key/value pairs produced by a section reference.
///
/// Each suffix is relative to the key that held the reference.
pub type SectionPairs = Vec<(String, Option<String>)>;

/// Outcome of resolving a value or a single reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A single value.
    Value(Option<String>),
    /// A section expansion that replaces the owning key.
    Section(SectionPairs),
}

impl Resolved {
    fn empty() -> Self {
        Self::Value(Some(String::new()))
    }
}

/// The key maps a path can belong to while resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySpace {
    Structure,
    Environment,
    Variables,
}

impl KeySpace {
    const fn namespace(self) -> Namespace {
        match self {
            Self::Structure | Self::Environment => Namespace::Environment,
            Self::Variables => Namespace::Structure,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Environment => "environment",
            Self::Variables => "$struct",
        }
    }
}

/// One entry of the stack of paths currently being expanded.
#[derive(Debug)]
struct Frame<'f> {
    space: KeySpace,
    path: &'f str,
    depth: usize,
    parent: Option<&'f Frame<'f>>,
}

impl<'f> Frame<'f> {
    const fn root(path: &'f str) -> Self {
        Self {
            space: KeySpace::Structure,
            path,
            depth: 0,
            parent: None,
        }
    }

    const fn child(&'f self, space: KeySpace, path: &'f str) -> Self {
        Self {
            space,
            path,
            depth: self.depth + 1,
            parent: Some(self),
        }
    }

    fn contains(&self, space: KeySpace, path: &str) -> bool {
        let mut current = Some(self);
        while let Some(frame) = current {
            if frame.space == space && frame.path == path {
                return true;
            }
            current = frame.parent;
        }
        false
    }
}

/// Where a reference is looked up.
enum Source {
    Keys(KeySpace),
    Secret,
    Unknown(String),
}

/// Everything a reference can be resolved against.
///
/// The context only borrows its inputs and holds no mutable state, so one
/// context can resolve any number of keys.
#[derive(Debug)]
pub struct ResolutionContext<'a, P: ?Sized, S: ?Sized> {
    environment: &'a ConfigMap,
    structure: &'a ConfigMap,
    variables: &'a ConfigMap,
    parser: &'a P,
    secrets: &'a S,
    settings: &'a CompilerSettings,
}

impl<'a, P, S> ResolutionContext<'a, P, S>
where
    P: ValueParser + ?Sized,
    S: SecretLookup + ?Sized,
{
    /// Creates a context over the given key spaces.
    #[must_use]
    pub const fn new(
        environment: &'a ConfigMap,
        structure: &'a ConfigMap,
        variables: &'a ConfigMap,
        parser: &'a P,
        secrets: &'a S,
        settings: &'a CompilerSettings,
    ) -> Self {
        Self {
            environment,
            structure,
            variables,
            parser,
            secrets,
            settings,
        }
    }

    /// Parses and resolves `text` as the value of the structure key
    /// `current_path`.
    #[must_use]
    pub fn resolve_text(&self, current_path: &str, text: &str) -> (Resolved, TraceNode) {
        let parts = self.parser.parse(text);
        let mut node = TraceNode::new(current_path);
        let resolved = self.resolve_parts_at(current_path, &parts, &mut node);
        (resolved, node)
    }

    /// Resolves already parsed parts of the structure key `current_path`.
    ///
    /// Trace nodes for each reference are appended to `node.children`.
    pub fn resolve_parts_at(
        &self,
        current_path: &str,
        parts: &[Part],
        node: &mut TraceNode,
    ) -> Resolved {
        self.resolve_parts(parts, &Frame::root(current_path), node)
    }

    const fn keys(&self, space: KeySpace) -> &'a ConfigMap {
        match space {
            KeySpace::Structure => self.structure,
            KeySpace::Environment => self.environment,
            KeySpace::Variables => self.variables,
        }
    }

    fn resolve_parts(&self, parts: &[Part], frame: &Frame<'_>, node: &mut TraceNode) -> Resolved {
        if let [Part::Reference(reference)] = parts {
            let (resolved, child) = self.resolve_reference(reference, true, frame);
            node.children.push(child);
            return resolved;
        }

        let mut value = String::new();
        for part in parts {
            match part {
                Part::Value(text) => value.push_str(text),
                Part::Reference(reference) => {
                    let (resolved, child) = self.resolve_reference(reference, false, frame);
                    node.children.push(child);
                    if let Resolved::Value(Some(text)) = resolved {
                        value.push_str(&text);
                    }
                }
            }
        }
        Resolved::Value(Some(value))
    }

    /// Resolves one reference. `whole` is true when the reference is the
    /// entire value, which is the only place a section may appear.
    fn resolve_reference(
        &self,
        reference: &Reference,
        whole: bool,
        frame: &Frame<'_>,
    ) -> (Resolved, TraceResult) {
        let Some((namespace, path)) = reference.target() else {
            let mut node = TraceNode::new(reference.source.as_str());
            node.record(&ResolutionIssue::MissingPath(reference.source.clone()));
            let trace = TraceResult::Key {
                node,
                reference: reference.clone(),
                namespace: Namespace::Environment,
                value: Some(String::new()),
            };
            return (Resolved::empty(), trace);
        };

        let (source, lookup) = match namespace {
            Namespace::Environment => (Source::Keys(KeySpace::Environment), Cow::Borrowed(path)),
            Namespace::This => (
                Source::Keys(KeySpace::Environment),
                Cow::Owned(sibling_path(frame.path, path)),
            ),
            Namespace::Structure => (Source::Keys(KeySpace::Variables), Cow::Borrowed(path)),
            Namespace::Secret => (Source::Secret, Cow::Borrowed(path)),
            Namespace::Unknown(name) => (Source::Unknown(name), Cow::Borrowed(path)),
        };

        trace!(
            reference = %reference,
            path = %lookup,
            current = frame.path,
            "resolving reference"
        );

        let mut node = TraceNode::new(lookup.as_ref());
        let (resolved, namespace) = match source {
            Source::Keys(space) => (
                self.resolve_in(space, &lookup, whole, frame, &mut node),
                space.namespace(),
            ),
            Source::Secret => (self.resolve_secret(&lookup, &mut node), Namespace::Secret),
            Source::Unknown(name) => {
                node.record(&ResolutionIssue::UnknownNamespace {
                    namespace: name.clone(),
                    reference: reference.source.clone(),
                });
                (Resolved::empty(), Namespace::Unknown(name))
            }
        };

        let value = match &resolved {
            Resolved::Value(value) => value.clone(),
            Resolved::Section(_) => None,
        };
        let trace = TraceResult::Key {
            node,
            reference: reference.clone(),
            namespace,
            value,
        };
        (resolved, trace)
    }

    fn resolve_in(
        &self,
        space: KeySpace,
        path: &str,
        whole: bool,
        frame: &Frame<'_>,
        node: &mut TraceNode,
    ) -> Resolved {
        if let Some(prefix) = path.strip_suffix(SECTION_SUFFIX) {
            if !whole {
                node.record(&ResolutionIssue::SectionNotWholeValue(path.to_string()));
                return Resolved::empty();
            }
            return self.expand_section(space, prefix, false, frame, node);
        }

        if let Some(prefix) = path.strip_suffix('*') {
            if !self.settings.legacy_wildcard_prefix {
                node.record(&ResolutionIssue::RejectedWildcard(path.to_string()));
                return Resolved::empty();
            }
            node.record(&ResolutionIssue::MalformedWildcard(path.to_string()));
            if !whole {
                node.record(&ResolutionIssue::SectionNotWholeValue(path.to_string()));
                return Resolved::empty();
            }
            return self.expand_section(space, prefix, true, frame, node);
        }

        let keys = self.keys(space);
        let Some((key, value)) = keys.get_key_value(path) else {
            node.record(&ResolutionIssue::MissingKey {
                namespace: space.label().to_string(),
                path: path.to_string(),
            });
            return Resolved::empty();
        };

        // A null reached through a direct reference becomes an empty string
        let Some(text) = value else {
            return Resolved::empty();
        };

        let parts = self.parser.parse(text);
        if !has_reference(&parts) {
            return Resolved::Value(Some(text.clone()));
        }

        let Some(inner) = self.enter(frame, space, key, node) else {
            return Resolved::empty();
        };
        match self.resolve_parts(&parts, &inner, node) {
            Resolved::Section(_) if !whole => {
                node.record(&ResolutionIssue::SectionNotWholeValue(key.clone()));
                Resolved::empty()
            }
            resolved => resolved,
        }
    }

    /// Expands every key under `prefix`.
    ///
    /// With `bare` set the prefix is matched as plain text rather than as a
    /// parent path, and the leading `/` of each suffix is dropped.
    ///
    /// The section itself is pushed on the frame stack, so an entry that
    /// reaches back into a section already being expanded resolves to `""`.
    fn expand_section(
        &self,
        space: KeySpace,
        prefix: &str,
        bare: bool,
        frame: &Frame<'_>,
        node: &mut TraceNode,
    ) -> Resolved {
        let wildcard = if bare { "*" } else { SECTION_SUFFIX };
        let section = format!("{prefix}{wildcard}");
        let Some(frame) = self.enter(frame, space, &section, node) else {
            return Resolved::empty();
        };

        let pattern: Cow<'_, str> = if bare {
            Cow::Borrowed(prefix)
        } else {
            Cow::Owned(format!("{prefix}/"))
        };

        let keys = self.keys(space);
        let matched = keys
            .range::<str, _>((Bound::Included(pattern.as_ref()), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(pattern.as_ref()));

        let mut pairs = SectionPairs::new();
        for (key, value) in matched {
            let suffix = &key[pattern.len()..];
            let suffix = if bare {
                suffix.trim_start_matches('/')
            } else {
                suffix
            };
            let child =
                self.expand_entry(space, key, value.as_deref(), suffix, &frame, &mut pairs);
            node.children.push(child);
        }

        if pairs.is_empty() {
            node.record(&ResolutionIssue::EmptySection(section));
        }
        Resolved::Section(pairs)
    }

    /// Resolves one key matched by a section and appends its pairs.
    fn expand_entry(
        &self,
        space: KeySpace,
        key: &str,
        value: Option<&str>,
        suffix: &str,
        frame: &Frame<'_>,
        pairs: &mut SectionPairs,
    ) -> TraceResult {
        let mut node = TraceNode::new(key);

        // Nulls pass through a section unchanged
        let Some(text) = value else {
            pairs.push((suffix.to_string(), None));
            return TraceResult::Value { node, value: None };
        };

        let parts = self.parser.parse(text);
        if !has_reference(&parts) {
            pairs.push((suffix.to_string(), Some(text.to_string())));
            return TraceResult::Value {
                node,
                value: Some(text.to_string()),
            };
        }

        let resolved = match self.enter(frame, space, key, &mut node) {
            Some(inner) => self.resolve_parts(&parts, &inner, &mut node),
            None => Resolved::empty(),
        };

        match resolved {
            Resolved::Value(value) => {
                pairs.push((suffix.to_string(), value.clone()));
                TraceResult::Multi {
                    node,
                    original: Some(text.to_string()),
                    value,
                    expanded: Vec::new(),
                }
            }
            Resolved::Section(nested) => {
                let mut expanded = Vec::with_capacity(nested.len());
                for (inner_suffix, value) in nested {
                    let joined = join_suffix(suffix, &inner_suffix);
                    expanded.push(joined.clone());
                    pairs.push((joined, value));
                }
                TraceResult::Multi {
                    node,
                    original: Some(text.to_string()),
                    value: None,
                    expanded,
                }
            }
        }
    }

    fn resolve_secret(&self, path: &str, node: &mut TraceNode) -> Resolved {
        if path.ends_with('*') {
            node.record(&ResolutionIssue::SecretSection(path.to_string()));
            return Resolved::empty();
        }
        match self.secrets.try_get(path) {
            Some(secret) => Resolved::Value(Some(secret)),
            None => {
                node.record(&ResolutionIssue::MissingSecret(path.to_string()));
                Resolved::empty()
            }
        }
    }

    /// Pushes a frame for `path`, unless that would close a cycle or exceed
    /// the configured depth.
    fn enter<'f>(
        &self,
        frame: &'f Frame<'f>,
        space: KeySpace,
        path: &'f str,
        node: &mut TraceNode,
    ) -> Option<Frame<'f>> {
        if frame.contains(space, path) {
            debug!(path, space = space.label(), "cyclic reference");
            node.record(&ResolutionIssue::CyclicReference(path.to_string()));
            return None;
        }
        if let Some(limit) = self.settings.max_reference_depth
            && frame.depth >= limit
        {
            debug!(path, limit, "maximum reference depth reached");
            node.record(&ResolutionIssue::DepthExceeded {
                path: path.to_string(),
                limit,
            });
            return None;
        }
        Some(frame.child(space, path))
    }
}

fn has_reference(parts: &[Part]) -> bool {
    parts.iter().any(|part| part.as_reference().is_some())
}

/// Rewrites `relative` against the parent segment of `current`.
fn sibling_path(current: &str, relative: &str) -> String {
    match current.rsplit_once('/') {
        Some((parent, _)) => format!("{parent}/{relative}"),
        None => relative.to_string(),
    }
}

fn join_suffix(outer: &str, inner: &str) -> String {
    match (outer.is_empty(), inner.is_empty()) {
        (true, _) => inner.to_string(),
        (false, true) => outer.to_string(),
        (false, false) => format!("{outer}/{inner}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::compiler::parser::ReferenceParser;
    use crate::ports::NoSecrets;
    use keyforge_domain::compilation::to_config_map;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    struct Fixture {
        environment: ConfigMap,
        structure: ConfigMap,
        variables: ConfigMap,
        secrets: HashMap<String, String>,
        settings: CompilerSettings,
    }

    impl Fixture {
        fn new(environment: ConfigMap) -> Self {
            Self {
                environment,
                structure: ConfigMap::new(),
                variables: ConfigMap::new(),
                secrets: HashMap::new(),
                settings: CompilerSettings::default(),
            }
        }

        fn resolve(&self, key: &str, text: &str) -> (Resolved, TraceNode) {
            ResolutionContext::new(
                &self.environment,
                &self.structure,
                &self.variables,
                &ReferenceParser,
                &self.secrets,
                &self.settings,
            )
            .resolve_text(key, text)
        }
    }

    fn value(text: &str) -> Resolved {
        Resolved::Value(Some(text.to_string()))
    }

    #[test]
    fn test_literal_text() {
        let fixture = Fixture::new(ConfigMap::new());
        let (resolved, node) = fixture.resolve("A", "plain");
        assert_eq!(resolved, value("plain"));
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_concatenation() {
        let fixture = Fixture::new(to_config_map([("host", "localhost"), ("port", "8080")]));
        let (resolved, node) = fixture.resolve("url", "http://{{host}}:{{port}}/");
        assert_eq!(resolved, value("http://localhost:8080/"));
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn test_missing_key_warns() {
        let fixture = Fixture::new(ConfigMap::new());
        let (resolved, node) = fixture.resolve("A", "x{{missing}}y");
        assert_eq!(resolved, value("xy"));
        let child = &node.children[0];
        assert_eq!(child.key(), "missing");
        assert_eq!(
            child.warnings(),
            &["could not resolve 'missing' in environment".to_string()]
        );
    }

    #[test]
    fn test_null_whole_value_is_coerced() {
        let mut environment = ConfigMap::new();
        environment.insert("N".to_string(), None);
        let fixture = Fixture::new(environment);
        let (resolved, _) = fixture.resolve("A", "{{N}}");
        assert_eq!(resolved, value(""));
    }

    #[test]
    fn test_self_reference_terminates() {
        let fixture = Fixture::new(to_config_map([("A", "{{A}}")]));
        let (resolved, node) = fixture.resolve("A", "{{A}}");
        assert_eq!(resolved, value(""));
        let first = &node.children[0];
        assert!(first.errors().is_empty());
        assert_eq!(
            first.children()[0].errors(),
            &["cyclic reference to 'A'".to_string()]
        );
    }

    #[test]
    fn test_sibling_cycles_do_not_interfere() {
        // Both references walk through B; only a true cycle may stop one.
        let fixture = Fixture::new(to_config_map([("B", "{{C}}"), ("C", "value")]));
        let (resolved, node) = fixture.resolve("A", "{{B}}-{{B}}");
        assert_eq!(resolved, value("value-value"));
        assert!(node.children.iter().all(|c| !c.has_diagnostics()));
    }

    #[test]
    fn test_this_resolves_against_parent() {
        let fixture = Fixture::new(to_config_map([
            ("svc/name", "api"),
            ("svc/url", "http://{{$this/name}}"),
        ]));
        let (resolved, _) = fixture.resolve("url", "{{svc/url}}");
        assert_eq!(resolved, value("http://api"));
    }

    #[test]
    fn test_this_without_parent() {
        let fixture = Fixture::new(to_config_map([("name", "api")]));
        let (resolved, _) = fixture.resolve("top", "{{Using:$this; Path:name}}");
        assert_eq!(resolved, value("api"));
    }

    #[test]
    fn test_struct_and_secret_namespaces() {
        let mut fixture = Fixture::new(to_config_map([("user", "{{$struct/db/user}}")]));
        fixture.variables = to_config_map([("db/user", "admin")]);
        fixture
            .secrets
            .insert("db/password".to_string(), "hunter2".to_string());

        let (resolved, node) = fixture.resolve("conn", "{{user}}:{{$secret/db/password}}");
        assert_eq!(resolved, value("admin:hunter2"));
        match &node.children[1] {
            TraceResult::Key { namespace, .. } => assert_eq!(namespace, &Namespace::Secret),
            other => panic!("unexpected trace {other:?}"),
        }
    }

    #[test]
    fn test_secret_values_are_not_expanded() {
        let mut fixture = Fixture::new(to_config_map([("A", "a")]));
        fixture.secrets.insert("s".to_string(), "{{A}}".to_string());
        let (resolved, _) = fixture.resolve("K", "{{Using:$secret;Path:s}}");
        assert_eq!(resolved, value("{{A}}"));
    }

    #[test]
    fn test_unknown_namespace_and_missing_path() {
        let fixture = Fixture::new(to_config_map([("A", "a")]));
        let (resolved, node) = fixture.resolve("K", "{{Using:$vault;Path:A}}{{Alias:x}}");
        assert_eq!(resolved, value(""));
        assert_eq!(node.children[0].warnings().len(), 1);
        assert_eq!(node.children[1].errors().len(), 1);
    }

    #[test]
    fn test_section_expansion() {
        let fixture = Fixture::new(to_config_map([
            ("A/x", "1"),
            ("A/y/z", "2"),
            ("AB", "not matched"),
        ]));
        let (resolved, _) = fixture.resolve("K", "{{A/*}}");
        assert_eq!(
            resolved,
            Resolved::Section(vec![
                ("x".to_string(), Some("1".to_string())),
                ("y/z".to_string(), Some("2".to_string())),
            ])
        );
    }

    #[test]
    fn test_section_inside_text_is_rejected() {
        let fixture = Fixture::new(to_config_map([("A/x", "1")]));
        let (resolved, node) = fixture.resolve("K", "prefix {{A/*}}");
        assert_eq!(resolved, value("prefix "));
        assert_eq!(node.children[0].warnings().len(), 1);
    }

    #[test]
    fn test_nested_section_flattens() {
        let fixture = Fixture::new(to_config_map([
            ("A/x", "1"),
            ("A/inner", "{{B/*}}"),
            ("B/y", "2"),
        ]));
        let (resolved, _) = fixture.resolve("K", "{{A/*}}");
        assert_eq!(
            resolved,
            Resolved::Section(vec![
                ("inner/y".to_string(), Some("2".to_string())),
                ("x".to_string(), Some("1".to_string())),
            ])
        );
    }

    #[test]
    fn test_section_reentering_itself_is_empty() {
        let fixture = Fixture::new(to_config_map([
            ("S/a", "{{S/*}}"),
            ("S/b", "{{S/*}}"),
            ("S/c", "plain"),
        ]));
        let (resolved, node) = fixture.resolve("K", "{{S/*}}");
        assert_eq!(
            resolved,
            Resolved::Section(vec![
                ("a".to_string(), Some(String::new())),
                ("b".to_string(), Some(String::new())),
                ("c".to_string(), Some("plain".to_string())),
            ])
        );
        let errors: Vec<&String> = node
            .children
            .iter()
            .flat_map(TraceResult::iter)
            .flat_map(|n| n.errors())
            .collect();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| *e == "cyclic reference to 'S/*'"));
    }

    #[test]
    fn test_unrecognized_commands_and_mixed_case_are_resolved() {
        let fixture = Fixture::new(to_config_map([("C", "CV"), ("db/host", "h")]));
        let (resolved, node) = fixture.resolve("K", "{{Path:C;Format:x}}");
        assert_eq!(resolved, value("CV"));
        assert!(!node.children[0].has_diagnostics());

        let (resolved, _) = fixture.resolve("K", "{{PATH:db/host; alias:Host}}");
        assert_eq!(resolved, value("h"));
        let (resolved, _) = fixture.resolve("db/url", "{{using:$this; PATH:host}}");
        assert_eq!(resolved, value("h"));
    }

    #[test]
    fn test_reference_to_section_propagates() {
        let fixture = Fixture::new(to_config_map([("alias", "{{A/*}}"), ("A/x", "1")]));
        let (resolved, _) = fixture.resolve("K", "{{alias}}");
        assert_eq!(
            resolved,
            Resolved::Section(vec![("x".to_string(), Some("1".to_string()))])
        );

        let (resolved, _) = fixture.resolve("K", "v={{alias}}");
        assert_eq!(resolved, value("v="));
    }

    #[test]
    fn test_bare_wildcard_prefix() {
        let fixture = Fixture::new(to_config_map([("A", "root"), ("A/x", "1"), ("AB", "2")]));
        let (resolved, node) = fixture.resolve("K", "{{A*}}");
        assert_eq!(
            resolved,
            Resolved::Section(vec![
                (String::new(), Some("root".to_string())),
                ("x".to_string(), Some("1".to_string())),
                ("B".to_string(), Some("2".to_string())),
            ])
        );
        assert_eq!(node.children[0].warnings().len(), 1);
    }

    #[test]
    fn test_bare_wildcard_disabled() {
        let mut fixture = Fixture::new(to_config_map([("A/x", "1")]));
        fixture.settings = CompilerSettings::default().with_legacy_wildcard_prefix(false);
        let (resolved, _) = fixture.resolve("K", "{{A*}}");
        assert_eq!(resolved, value(""));
    }

    #[test]
    fn test_depth_limit() {
        let mut fixture = Fixture::new(to_config_map([
            ("A", "{{B}}"),
            ("B", "{{C}}"),
            ("C", "{{D}}"),
            ("D", "end"),
        ]));
        let (resolved, _) = fixture.resolve("K", "{{A}}");
        assert_eq!(resolved, value("end"));

        fixture.settings = CompilerSettings::default().with_max_reference_depth(2);
        let (resolved, node) = fixture.resolve("K", "{{A}}");
        assert_eq!(resolved, value(""));
        let errors: usize = node
            .children
            .iter()
            .flat_map(TraceResult::iter)
            .map(|n| n.errors().len())
            .sum();
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_works_with_trait_objects() {
        let environment = to_config_map([("A", "a")]);
        let empty = ConfigMap::new();
        let settings = CompilerSettings::default();
        let parser: &dyn ValueParser = &ReferenceParser;
        let secrets: &dyn SecretLookup = &NoSecrets;
        let context =
            ResolutionContext::new(&environment, &empty, &empty, parser, secrets, &settings);
        assert_eq!(context.resolve_text("K", "{{A}}").0, value("a"));
    }

    #[test]
    fn test_sibling_path() {
        assert_eq!(sibling_path("A/B/C", "D"), "A/B/D");
        assert_eq!(sibling_path("A", "D"), "D");
    }

    #[test]
    fn test_join_suffix() {
        assert_eq!(join_suffix("a", "b"), "a/b");
        assert_eq!(join_suffix("", "b"), "b");
        assert_eq!(join_suffix("a", ""), "a");
    }
}
