//! Quoting utilities for generated PostgreSQL.

use std::sync::OnceLock;

use regex::Regex;

/// Quote an identifier (table, column, alias) with double quotes.
///
/// Embedded double quotes are doubled, so the result is always a single
/// identifier token regardless of content.
pub fn quote_ident(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 2);
    result.push('"');
    for c in name.chars() {
        if c == '"' {
            result.push('"');
        }
        result.push(c);
    }
    result.push('"');
    result
}

/// Quote a string literal with single quotes, doubling embedded quotes.
///
/// Assumes `standard_conforming_strings = on` (the PostgreSQL default), so
/// backslashes are kept verbatim.
pub fn quote_literal(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('\'');
    for c in value.chars() {
        if c == '\'' {
            result.push('\'');
        }
        result.push(c);
    }
    result.push('\'');
    result
}

fn plain_identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"))
}

/// Whether `name` is a bare identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_plain_identifier(name: &str) -> bool {
    plain_identifier_re().is_match(name)
}
