//! Binding compiled predicates to SQLite parameters

use rusqlite::types::Value as SqlValue;
use sqkv_core::{BoundPredicate, ComparableValue};

/// SQLite value bound for a comparable value
///
/// Booleans bind as `1`/`0`, matching what `json_extract` returns for JSON
/// `true`/`false`. Integers that fit `i64` bind as INTEGER, other numbers as
/// REAL.
pub fn to_sql_value(value: &ComparableValue) -> SqlValue {
    match value {
        ComparableValue::Bool(b) => SqlValue::Integer(i64::from(*b)),
        ComparableValue::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(0.0)),
        },
        ComparableValue::String(s) => SqlValue::Text(s.clone()),
    }
}

/// Parameters of a bound predicate, in placeholder order
pub fn bind_params(predicate: &BoundPredicate) -> Vec<SqlValue> {
    predicate.params.iter().map(to_sql_value).collect()
}
