//! Escaping of untrusted text into GROQ literals and field paths.
//!
//! Every function here is pure. The generator calls [`escape_string_literal`]
//! for string values and [`escape_field_path`] for every field reference, so
//! caller-supplied names and values can never break out of their token.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bare GROQ identifier: usable unquoted in a field path.
static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Replacement table, applied in order. Backslash must come first.
const ESCAPES: [(char, &str); 8] = [
    ('\\', "\\\\"),
    ('"', "\\\""),
    ('\n', "\\n"),
    ('\r', "\\r"),
    ('\t', "\\t"),
    ('\u{0C}', "\\f"),
    ('\u{0B}', "\\v"),
    ('`', "\\`"),
];

/// Escapes a string for use inside a double-quoted GROQ string literal.
///
/// This is a single forward transform: applying it twice escapes the
/// backslashes introduced by the first pass.
///
/// ```
/// use groq_builder::escape_string_literal;
///
/// assert_eq!(escape_string_literal(r#"say "hi""#), r#"say \"hi\""#);
/// assert_eq!(escape_string_literal("a\tb"), r"a\tb");
/// ```
pub fn escape_string_literal(s: &str) -> String {
    ESCAPES
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(*from, to))
}

/// Reverses [`escape_string_literal`].
///
/// Unknown escape sequences are kept verbatim, and a trailing lone backslash
/// is preserved.
pub fn unescape_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('f') => out.push('\u{0C}'),
            Some('v') => out.push('\u{0B}'),
            Some('`') => out.push('`'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Returns `true` if `name` can be written as a bare GROQ identifier.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// Wraps a string as a quoted, escaped GROQ string literal.
pub fn quote(s: &str) -> String {
    format!("\"{}\"", escape_string_literal(s))
}

/// Escapes a field name or dotted field path.
///
/// - A bare identifier is returned unchanged.
/// - A dotted path keeps valid segments bare and quotes the rest.
/// - Anything else is quoted as a whole.
///
/// ```
/// use groq_builder::escape_field_path;
///
/// assert_eq!(escape_field_path("title"), "title");
/// assert_eq!(escape_field_path("author.full name"), r#"author."full name""#);
/// assert_eq!(escape_field_path("my-field"), r#""my-field""#);
/// ```
pub fn escape_field_path(name: &str) -> String {
    if is_identifier(name) {
        return name.to_string();
    }

    if name.contains('.') {
        return name
            .split('.')
            .map(|segment| {
                if is_identifier(segment) {
                    segment.to_string()
                } else {
                    quote(segment)
                }
            })
            .collect::<Vec<_>>()
            .join(".");
    }

    quote(name)
}

/// Deep-sanitizes a JSON value before it is used to build filter values.
///
/// - `null` becomes the string marker `"null"`
/// - strings are escaped with [`escape_string_literal`]
/// - arrays are sanitized element by element, preserving order
/// - objects are sanitized per value; keys are left untouched
/// - numbers and booleans pass through
pub fn sanitize_value(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value as Json;

    match value {
        Json::Null => Json::String("null".to_string()),
        Json::String(s) => Json::String(escape_string_literal(&s)),
        Json::Array(items) => Json::Array(items.into_iter().map(sanitize_value).collect()),
        Json::Object(map) => Json::Object(
            map.into_iter()
                .map(|(key, v)| (key, sanitize_value(v)))
                .collect(),
        ),
        other => other,
    }
}
