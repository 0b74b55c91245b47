//! Literal encoder
//!
//! Renders a [`ComparableValue`] as SQLite literal text. This is the single
//! chokepoint through which values reach inline predicate text; bound
//! predicates (see [`BoundPredicate`](super::BoundPredicate)) skip it entirely.
//!
//! SQLite string literals only give special meaning to the single quote, so
//! quotes are doubled and everything else (backslash, `;`, newlines) is
//! emitted verbatim. A NUL byte would truncate the statement text, so any
//! string containing one is emitted as a hex blob cast back to text.

use crate::value::ComparableValue;
use std::fmt::Write;

/// Encode a comparable value as a SQL literal
pub fn encode(value: &ComparableValue) -> String {
    match value {
        ComparableValue::Bool(true) => "TRUE".to_string(),
        ComparableValue::Bool(false) => "FALSE".to_string(),
        ComparableValue::Number(n) => encode_number(n),
        ComparableValue::String(s) => quote_str(s),
    }
}

/// Quote a string as a SQL text literal
pub fn quote_str(s: &str) -> String {
    if s.contains('\0') {
        return hex_text(s);
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

fn encode_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    // Display for f64 is locale independent and round-trips.
    let f = n.as_f64().unwrap_or(0.0);
    let text = f.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}

fn hex_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2 + 20);
    out.push_str("CAST(X'");
    for byte in s.as_bytes() {
        let _ = write!(out, "{byte:02X}");
    }
    out.push_str("' AS TEXT)");
    out
}
