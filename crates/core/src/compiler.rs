//! Selector compiler
//!
//! Turns a selector into one boolean SQL expression over
//! `json_extract(value, <path>)`. The compiler is a set of pure functions:
//! no state is kept between calls and the same selector always yields
//! byte-identical output.
//!
//! Clause order follows key declaration order and `$and`/`$or` elements
//! follow array order.
//!
//! ```
//! use serde_json::json;
//!
//! let sql = sqkv_core::compile(&json!({"$.a": {"$gt": 1}, "$.b": "x"})).unwrap();
//! assert_eq!(
//!     sql,
//!     "( json_extract(value, '$.a') > 1 ) AND ( json_extract(value, '$.b') = 'x' )"
//! );
//! ```

use crate::error::Result;
use crate::selector::{Clause, FieldOperator, Selector, UnaryDirective};
use crate::sql::predicate::{self, BoundPredicate, Predicate};
use tracing::trace;

/// Compile a JSON selector into predicate text with inline literals
///
/// The result is safe to place directly after `WHERE`.
pub fn compile(selector: &serde_json::Value) -> Result<String> {
    let parsed = Selector::from_value(selector)?;
    let sql = compile_selector(&parsed).to_inline_sql();
    trace!(predicate = %sql, "compiled selector");
    Ok(sql)
}

/// Compile a JSON selector into predicate text with `?` placeholders
///
/// Values, including field paths, are returned separately for binding.
pub fn compile_bound(selector: &serde_json::Value) -> Result<BoundPredicate> {
    let parsed = Selector::from_value(selector)?;
    let bound = compile_selector(&parsed).to_bound_sql();
    trace!(predicate = %bound.sql, params = bound.params.len(), "compiled selector");
    Ok(bound)
}

/// Compile a parsed selector
///
/// Top-level clauses are joined with `AND` and left unparenthesized; an
/// empty selector compiles to `TRUE`.
pub fn compile_selector(selector: &Selector) -> Predicate {
    predicate::conjunction(compile_object(selector))
}

/// Compile each clause of one selector object, in declaration order
pub fn compile_object(selector: &Selector) -> Vec<Predicate> {
    selector.clauses().iter().map(compile_clause).collect()
}

/// Compile `$and`/`$or` elements, each ANDed into one parenthesized unit
pub fn compile_array(selectors: &[Selector]) -> Vec<Predicate> {
    selectors
        .iter()
        .map(|s| predicate::all(compile_object(s)))
        .collect()
}

fn compile_clause(clause: &Clause) -> Predicate {
    match clause {
        Clause::Equality { path, value } => predicate::eq(path, value.clone()),
        Clause::Operator { path, operator } => match operator {
            FieldOperator::Compare(op, operand) => predicate::compare(path, *op, operand.clone()),
            FieldOperator::Exists(present) => predicate::exists(path, *present),
        },
        Clause::And(items) => predicate::all(compile_array(items)),
        Clause::Or(items) => predicate::any(compile_array(items)),
        Clause::Unary { directive, path } => match directive {
            UnaryDirective::Exists => predicate::exists(path, true),
            UnaryDirective::Null => predicate::null(path),
            UnaryDirective::NotNull => predicate::not_null(path),
        },
    }
}

impl Selector {
    /// Compile this selector into a predicate
    pub fn to_predicate(&self) -> Predicate {
        compile_selector(self)
    }
}
