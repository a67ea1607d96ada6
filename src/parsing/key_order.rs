//! Recovers the textual order of keys inside a field's object literal.
//!
//! `serde_json::Map` does not keep insertion order, so group names such as
//! `{"Sauce": [...], "Protein": [...]}` come back sorted after decoding. The
//! raw text is the source of truth for their order.
//!
//! The scan does not understand nested objects: a field whose object literal
//! contains another `{}` is reported as absent. Recipe group values are flat
//! string lists, so this never applies to well-formed payloads.

use once_cell::sync::Lazy;
use regex::Regex;

/// A JSON string literal, escapes included.
pub(crate) static STRING_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("valid string literal regex"));

/// An object literal without nested objects. Braces inside strings are allowed.
static FLAT_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\{((?:[^{}"]|"(?:[^"\\]|\\.)*")*)\}"#).expect("valid flat object regex")
});

/// Returns the keys of `"<field_name>": { ... }` in the order they appear.
///
/// Only the first occurrence of the field is considered. `None` when the
/// field is missing, holds something other than an object, or the object
/// contains nested objects.
pub fn extract_ordered_keys(field_name: &str, json: &str) -> Option<Vec<String>> {
    let field = Regex::new(&format!(r#""{}"\s*:\s*"#, regex::escape(field_name))).ok()?;
    let value_start = field.find(json)?.end();

    let block = FLAT_OBJECT.captures(&json[value_start..])?;
    let body = block.get(1)?.as_str();

    let keys = STRING_LITERAL
        .find_iter(body)
        .filter(|literal| body[literal.end()..].trim_start().starts_with(':'))
        .map(|literal| decode_literal(literal.as_str()))
        .collect();

    Some(keys)
}

/// Unescapes a JSON string literal, keeping the raw contents if it is invalid.
fn decode_literal(literal: &str) -> String {
    serde_json::from_str::<String>(literal)
        .unwrap_or_else(|_| literal[1..literal.len() - 1].to_string())
}
