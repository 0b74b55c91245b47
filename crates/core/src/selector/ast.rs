//! Selector syntax tree
//!
//! A selector is an ordered list of [`Clause`]s, implicitly ANDed. The shape
//! is fixed at parse time, so the compiler matches exhaustively and a new
//! operator cannot fall through unnoticed.

use crate::sql::CompareOp;
use crate::value::{ComparableValue, FieldPath};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Selector key for the AND combinator
pub const AND_KEY: &str = "$and";
/// Selector key for the OR combinator
pub const OR_KEY: &str = "$or";
/// Operator key for the path presence test
pub const EXISTS_KEY: &str = "$exists";

/// Unary directive keyed at selector level, e.g. `{"$null": "$.a"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryDirective {
    /// `$exists`: the path is present (its value may be JSON null)
    Exists,
    /// `$null`: the path is absent or JSON null
    Null,
    /// `$notnull`: the path is present and not JSON null
    NotNull,
}

impl UnaryDirective {
    /// Selector key for this directive
    pub fn as_key(&self) -> &'static str {
        match self {
            UnaryDirective::Exists => EXISTS_KEY,
            UnaryDirective::Null => "$null",
            UnaryDirective::NotNull => "$notnull",
        }
    }

    /// Look up a directive by selector key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            EXISTS_KEY => Some(UnaryDirective::Exists),
            "$null" => Some(UnaryDirective::Null),
            "$notnull" => Some(UnaryDirective::NotNull),
            _ => None,
        }
    }
}

/// Operator object of a field condition, e.g. `{"$gt": 1}`
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOperator {
    /// Binary comparison against a scalar operand
    Compare(CompareOp, ComparableValue),
    /// `{"$exists": bool}`; `false` selects documents without the path
    Exists(bool),
}

impl FieldOperator {
    /// Selector key of this operator
    pub fn as_key(&self) -> &'static str {
        match self {
            FieldOperator::Compare(op, _) => op.as_key(),
            FieldOperator::Exists(_) => EXISTS_KEY,
        }
    }
}

/// One clause of a selector object
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `{path: value}`, implicit equality
    Equality {
        /// Field path
        path: FieldPath,
        /// Equality target
        value: ComparableValue,
    },
    /// `{path: {"$op": operand}}`
    Operator {
        /// Field path
        path: FieldPath,
        /// Operator and operand
        operator: FieldOperator,
    },
    /// `{"$and": [selector, ...]}`
    And(Vec<Selector>),
    /// `{"$or": [selector, ...]}`
    Or(Vec<Selector>),
    /// `{"$exists" | "$null" | "$notnull": path}`
    Unary {
        /// Directive
        directive: UnaryDirective,
        /// Field path
        path: FieldPath,
    },
}

impl Clause {
    /// Key this clause occupies in its selector object
    pub fn key(&self) -> &str {
        match self {
            Clause::Equality { path, .. } | Clause::Operator { path, .. } => path.as_str(),
            Clause::And(_) => AND_KEY,
            Clause::Or(_) => OR_KEY,
            Clause::Unary { directive, .. } => directive.as_key(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Clause::Equality { value, .. } => value.to_json(),
            Clause::Operator { operator, .. } => {
                let operand = match operator {
                    FieldOperator::Compare(_, v) => v.to_json(),
                    FieldOperator::Exists(b) => serde_json::Value::Bool(*b),
                };
                let mut map = serde_json::Map::new();
                map.insert(operator.as_key().to_string(), operand);
                serde_json::Value::Object(map)
            }
            Clause::And(items) | Clause::Or(items) => {
                serde_json::Value::Array(items.iter().map(Selector::to_value).collect())
            }
            Clause::Unary { path, .. } => serde_json::Value::String(path.as_str().to_string()),
        }
    }
}

/// Parsed selector: clauses in declaration order, ANDed together
///
/// Build one from JSON with [`Selector::from_value`] or
/// [`Selector::from_json_str`], or fluently:
///
/// ```
/// use sqkv_core::Selector;
///
/// let selector = Selector::new()
///     .gt("$.age", 21)
///     .or(vec![
///         Selector::new().eq("$.city", "Burbank"),
///         Selector::new().like("$.name", "%Smith%"),
///     ]);
/// assert_eq!(selector.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    clauses: Vec<Clause>,
}

impl Selector {
    /// Create an empty selector (matches every document)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selector from parsed clauses
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        Selector { clauses }
    }

    /// Clauses in declaration order
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Number of top-level clauses
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// True when there are no clauses
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Append a clause
    pub fn push(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Implicit equality, `{path: value}`
    pub fn matches(self, path: impl Into<FieldPath>, value: impl Into<ComparableValue>) -> Self {
        self.push(Clause::Equality {
            path: path.into(),
            value: value.into(),
        })
    }

    /// Explicit comparison, `{path: {"$op": value}}`
    pub fn compare(
        self,
        path: impl Into<FieldPath>,
        op: CompareOp,
        value: impl Into<ComparableValue>,
    ) -> Self {
        self.push(Clause::Operator {
            path: path.into(),
            operator: FieldOperator::Compare(op, value.into()),
        })
    }

    /// `$eq`
    pub fn eq(self, path: impl Into<FieldPath>, value: impl Into<ComparableValue>) -> Self {
        self.compare(path, CompareOp::Eq, value)
    }

    /// `$lt`
    pub fn lt(self, path: impl Into<FieldPath>, value: impl Into<ComparableValue>) -> Self {
        self.compare(path, CompareOp::Lt, value)
    }

    /// `$lte`
    pub fn lte(self, path: impl Into<FieldPath>, value: impl Into<ComparableValue>) -> Self {
        self.compare(path, CompareOp::Lte, value)
    }

    /// `$gt`
    pub fn gt(self, path: impl Into<FieldPath>, value: impl Into<ComparableValue>) -> Self {
        self.compare(path, CompareOp::Gt, value)
    }

    /// `$gte`
    pub fn gte(self, path: impl Into<FieldPath>, value: impl Into<ComparableValue>) -> Self {
        self.compare(path, CompareOp::Gte, value)
    }

    /// `$ne`
    pub fn ne(self, path: impl Into<FieldPath>, value: impl Into<ComparableValue>) -> Self {
        self.compare(path, CompareOp::Ne, value)
    }

    /// `$like`
    pub fn like(self, path: impl Into<FieldPath>, pattern: impl Into<String>) -> Self {
        self.compare(path, CompareOp::Like, pattern.into())
    }

    /// `$glob`
    pub fn glob(self, path: impl Into<FieldPath>, pattern: impl Into<String>) -> Self {
        self.compare(path, CompareOp::Glob, pattern.into())
    }

    /// `$regexp`
    pub fn regexp(self, path: impl Into<FieldPath>, pattern: impl Into<String>) -> Self {
        self.compare(path, CompareOp::Regexp, pattern.into())
    }

    /// `{path: {"$exists": present}}`
    pub fn exists(self, path: impl Into<FieldPath>, present: bool) -> Self {
        self.push(Clause::Operator {
            path: path.into(),
            operator: FieldOperator::Exists(present),
        })
    }

    /// `{"$null": path}`
    pub fn null(self, path: impl Into<FieldPath>) -> Self {
        self.push(Clause::Unary {
            directive: UnaryDirective::Null,
            path: path.into(),
        })
    }

    /// `{"$notnull": path}`
    pub fn not_null(self, path: impl Into<FieldPath>) -> Self {
        self.push(Clause::Unary {
            directive: UnaryDirective::NotNull,
            path: path.into(),
        })
    }

    /// `{"$and": selectors}`
    pub fn and(self, selectors: Vec<Selector>) -> Self {
        self.push(Clause::And(selectors))
    }

    /// `{"$or": selectors}`
    pub fn or(self, selectors: Vec<Selector>) -> Self {
        self.push(Clause::Or(selectors))
    }

    /// Render back to the JSON selector shape
    ///
    /// Clauses that share a key (possible only through the builder) collapse
    /// into the last one, like any JSON object.
    pub fn to_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for clause in &self.clauses {
            map.insert(clause.key().to_string(), clause.to_json());
        }
        serde_json::Value::Object(map)
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let doc = super::SelectorDocument::deserialize(deserializer)?;
        super::parse::parse(&doc).map_err(serde::de::Error::custom)
    }
}
