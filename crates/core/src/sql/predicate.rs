//! Predicate builders
//!
//! One builder per selector directive. Each produces a single parenthesized
//! boolean expression over `json_extract(value, <path>)`, where `value` is the
//! document column of the store table.
//!
//! A [`Predicate`] keeps SQL text and values apart until it is rendered:
//! [`Predicate::to_inline_sql`] routes every value through the literal
//! encoder, [`Predicate::to_bound_sql`] emits `?` placeholders and a parameter
//! list for the driver to bind.

use super::literal;
use crate::value::{ComparableValue, FieldPath};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the document column in a store table
pub const VALUE_COLUMN: &str = "value";

// =============================================================================
// Comparison operators
// =============================================================================

/// Binary comparison operator of a field condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// `$eq`, also the implicit operator for bare values
    Eq,
    /// `$lt`
    Lt,
    /// `$lte`
    Lte,
    /// `$gt`
    Gt,
    /// `$gte`
    Gte,
    /// `$ne`
    Ne,
    /// `$like`, SQL `%`/`_` patterns
    Like,
    /// `$glob`, shell-style patterns
    Glob,
    /// `$regexp`, needs a `regexp()` function in the host engine
    Regexp,
}

impl CompareOp {
    /// All comparison operators, in selector-key order
    pub const ALL: [CompareOp; 9] = [
        CompareOp::Eq,
        CompareOp::Lt,
        CompareOp::Lte,
        CompareOp::Gt,
        CompareOp::Gte,
        CompareOp::Ne,
        CompareOp::Like,
        CompareOp::Glob,
        CompareOp::Regexp,
    ];

    /// Selector key for this operator (e.g. `"$lte"`)
    pub fn as_key(&self) -> &'static str {
        match self {
            CompareOp::Eq => "$eq",
            CompareOp::Lt => "$lt",
            CompareOp::Lte => "$lte",
            CompareOp::Gt => "$gt",
            CompareOp::Gte => "$gte",
            CompareOp::Ne => "$ne",
            CompareOp::Like => "$like",
            CompareOp::Glob => "$glob",
            CompareOp::Regexp => "$regexp",
        }
    }

    /// Look up an operator by selector key
    pub fn from_key(key: &str) -> Option<Self> {
        CompareOp::ALL.into_iter().find(|op| op.as_key() == key)
    }

    /// SQL operator text
    pub fn sql_operator(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Ne => "<>",
            CompareOp::Like => "LIKE",
            CompareOp::Glob => "GLOB",
            CompareOp::Regexp => "REGEXP",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

// =============================================================================
// Predicate
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Fragment {
    Sql(String),
    Value(ComparableValue),
}

/// Boolean SQL expression with its values held separately
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    fragments: Vec<Fragment>,
}

/// Predicate rendered with `?` placeholders
///
/// `params` lines up positionally with the placeholders in `sql`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundPredicate {
    /// SQL text with one `?` per parameter
    pub sql: String,
    /// Values to bind, in placeholder order
    pub params: Vec<ComparableValue>,
}

impl Predicate {
    fn new() -> Self {
        Self::default()
    }

    fn sql(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if let Some(Fragment::Sql(last)) = self.fragments.last_mut() {
            last.push_str(&text);
        } else {
            self.fragments.push(Fragment::Sql(text));
        }
        self
    }

    fn value(&mut self, value: ComparableValue) -> &mut Self {
        self.fragments.push(Fragment::Value(value));
        self
    }

    fn append(&mut self, other: Predicate) -> &mut Self {
        for fragment in other.fragments {
            match fragment {
                Fragment::Sql(text) => self.sql(text),
                Fragment::Value(v) => self.value(v),
            };
        }
        self
    }

    fn extract(&mut self, function: &str, path: &FieldPath) -> &mut Self {
        self.sql(format!("{function}({VALUE_COLUMN}, "))
            .value(ComparableValue::String(path.as_str().to_string()))
            .sql(")")
    }

    /// Number of values carried by this predicate
    pub fn param_count(&self) -> usize {
        self.fragments
            .iter()
            .filter(|f| matches!(f, Fragment::Value(_)))
            .count()
    }

    /// Render with every value encoded inline as a SQL literal
    pub fn to_inline_sql(&self) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Sql(text) => out.push_str(text),
                Fragment::Value(v) => out.push_str(&literal::encode(v)),
            }
        }
        out
    }

    /// Render with `?` placeholders and a separate parameter list
    pub fn to_bound_sql(&self) -> BoundPredicate {
        let mut sql = String::new();
        let mut params = Vec::with_capacity(self.param_count());
        for fragment in &self.fragments {
            match fragment {
                Fragment::Sql(text) => sql.push_str(text),
                Fragment::Value(v) => {
                    sql.push('?');
                    params.push(v.clone());
                }
            }
        }
        BoundPredicate { sql, params }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_inline_sql())
    }
}

// =============================================================================
// Builders
// =============================================================================

/// `( json_extract(value, path) <op> operand )`
pub fn compare(path: &FieldPath, op: CompareOp, operand: ComparableValue) -> Predicate {
    let mut p = Predicate::new();
    p.sql("( ")
        .extract("json_extract", path)
        .sql(format!(" {} ", op.sql_operator()))
        .value(operand)
        .sql(" )");
    p
}

/// Equality
pub fn eq(path: &FieldPath, operand: ComparableValue) -> Predicate {
    compare(path, CompareOp::Eq, operand)
}

/// Strictly less than
pub fn lt(path: &FieldPath, operand: ComparableValue) -> Predicate {
    compare(path, CompareOp::Lt, operand)
}

/// Less than or equal
pub fn lte(path: &FieldPath, operand: ComparableValue) -> Predicate {
    compare(path, CompareOp::Lte, operand)
}

/// Strictly greater than
pub fn gt(path: &FieldPath, operand: ComparableValue) -> Predicate {
    compare(path, CompareOp::Gt, operand)
}

/// Greater than or equal
pub fn gte(path: &FieldPath, operand: ComparableValue) -> Predicate {
    compare(path, CompareOp::Gte, operand)
}

/// Inequality
pub fn ne(path: &FieldPath, operand: ComparableValue) -> Predicate {
    compare(path, CompareOp::Ne, operand)
}

/// SQL `LIKE` pattern match
pub fn like(path: &FieldPath, pattern: ComparableValue) -> Predicate {
    compare(path, CompareOp::Like, pattern)
}

/// Shell-style `GLOB` match
pub fn glob(path: &FieldPath, pattern: ComparableValue) -> Predicate {
    compare(path, CompareOp::Glob, pattern)
}

/// `REGEXP` match
pub fn regexp(path: &FieldPath, pattern: ComparableValue) -> Predicate {
    compare(path, CompareOp::Regexp, pattern)
}

/// Path presence test
///
/// `json_type` returns SQL NULL only when the path is absent, so a path
/// holding JSON `null` still counts as present.
pub fn exists(path: &FieldPath, present: bool) -> Predicate {
    let mut p = Predicate::new();
    p.sql("( ")
        .extract("json_type", path)
        .sql(if present { " IS NOT NULL )" } else { " IS NULL )" });
    p
}

/// True when the path is absent or holds JSON `null`
pub fn null(path: &FieldPath) -> Predicate {
    let mut p = Predicate::new();
    p.sql("( ").extract("json_extract", path).sql(" IS NULL )");
    p
}

/// True when the path is present and not JSON `null`
pub fn not_null(path: &FieldPath) -> Predicate {
    let mut p = Predicate::new();
    p.sql("( ")
        .extract("json_extract", path)
        .sql(" IS NOT NULL )");
    p
}

/// Conjunction of `parts` as one parenthesized group
///
/// An empty conjunction is `( TRUE )`.
pub fn all(parts: Vec<Predicate>) -> Predicate {
    group(parts, "AND", "TRUE")
}

/// Disjunction of `parts` as one parenthesized group
///
/// An empty disjunction is `( FALSE )`.
pub fn any(parts: Vec<Predicate>) -> Predicate {
    group(parts, "OR", "FALSE")
}

/// Conjunction of `parts` without surrounding parentheses
///
/// Used for the outermost level, which the caller places after `WHERE`.
/// An empty conjunction is `TRUE`.
pub fn conjunction(parts: Vec<Predicate>) -> Predicate {
    let mut p = Predicate::new();
    if parts.is_empty() {
        p.sql("TRUE");
        return p;
    }
    join_into(&mut p, parts, "AND");
    p
}

fn group(parts: Vec<Predicate>, joiner: &str, identity: &str) -> Predicate {
    let mut p = Predicate::new();
    p.sql("( ");
    if parts.is_empty() {
        p.sql(identity);
    } else {
        join_into(&mut p, parts, joiner);
    }
    p.sql(" )");
    p
}

fn join_into(p: &mut Predicate, parts: Vec<Predicate>, joiner: &str) {
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            p.sql(format!(" {joiner} "));
        }
        p.append(part);
    }
}
