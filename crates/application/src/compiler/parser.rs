//! Value parser for `{{...}}` references
//!
//! Splits a raw value into literal and reference parts without looking at
//! any key space.

use keyforge_domain::reference::{CLOSE, OPEN, Part, Reference};

/// Turns raw values into parts.
///
/// The compiler is generic over this trait so tooling can swap in a parser
/// with a different reference syntax.
pub trait ValueParser {
    /// Parses `text` into an ordered list of parts.
    fn parse(&self, text: &str) -> Vec<Part>;
}

/// The default parser for `{{Using:NS;Path:P;Alias:A}}` syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceParser;

impl ValueParser for ReferenceParser {
    fn parse(&self, text: &str) -> Vec<Part> {
        parse_value(text)
    }
}

impl<T: ValueParser + ?Sized> ValueParser for &T {
    fn parse(&self, text: &str) -> Vec<Part> {
        (**self).parse(text)
    }
}

/// Parses a string into literal and reference parts.
///
/// A reference spans from the last `{{` before a `}}` to that `}}`.
/// Anything that does not form a reference, including a stray `}}`, an
/// unterminated `{{` or an empty `{{}}`, stays literal text. Concatenating
/// [`Part::source_text`] of every part gives back the input.
///
/// # Examples
///
/// ```
/// use keyforge_application::compiler::parser::parse_value;
/// use keyforge_domain::Part;
///
/// let parts = parse_value("http://{{host}}:{{Using:$struct; Path:port}}");
/// assert_eq!(parts.len(), 4);
/// assert_eq!(parts[0], Part::Value("http://".to_string()));
/// assert_eq!(parts[1].as_reference().unwrap().path.as_deref(), Some("host"));
/// assert_eq!(parts[3].as_reference().unwrap().using.as_deref(), Some("$struct"));
/// ```
#[must_use]
pub fn parse_value(input: &str) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = input;

    while let Some(close) = rest.find(CLOSE) {
        let end = close + CLOSE.len();

        // Stray `}}` without an opening delimiter
        let Some(open) = rest[..close].rfind(OPEN) else {
            literal.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        };

        let body = &rest[open + OPEN.len()..close];
        if body.trim().is_empty() {
            literal.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        literal.push_str(&rest[..open]);
        if !literal.is_empty() {
            parts.push(Part::Value(std::mem::take(&mut literal)));
        }
        parts.push(Part::Reference(Reference::from_body(body, &rest[open..end])));
        rest = &rest[end..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(Part::Value(literal));
    }

    parts
}

/// Returns true if the input contains at least one reference.
#[must_use]
pub fn has_references(input: &str) -> bool {
    input.contains(OPEN)
        && input.contains(CLOSE)
        && parse_value(input)
            .iter()
            .any(|part| part.as_reference().is_some())
}

/// Extracts the references from the input, in order.
#[must_use]
pub fn extract_references(input: &str) -> Vec<Reference> {
    parse_value(input)
        .into_iter()
        .filter_map(|part| match part {
            Part::Reference(reference) => Some(reference),
            Part::Value(_) => None,
        })
        .collect()
}
