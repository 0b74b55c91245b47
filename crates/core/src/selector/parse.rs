//! Selector parser
//!
//! Interprets a [`SelectorDocument`] into a [`Selector`]. Every selector
//! error is raised here; a parsed selector always compiles.

use super::ast::{Clause, FieldOperator, Selector, UnaryDirective, AND_KEY, EXISTS_KEY, OR_KEY};
use super::document::SelectorDocument;
use crate::error::{Result, SelectorError};
use crate::sql::CompareOp;
use crate::value::{ComparableValue, FieldPath};
use std::collections::HashSet;

/// Parse a top-level selector
///
/// The root must be an object.
pub fn parse(doc: &SelectorDocument) -> Result<Selector> {
    match doc {
        SelectorDocument::Object(entries) => parse_object(entries),
        other => Err(SelectorError::InvalidSelectorRoot {
            value: other.to_string(),
        }),
    }
}

/// Parse the entries of one selector object, in declaration order
fn parse_object(entries: &[(String, SelectorDocument)]) -> Result<Selector> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut clauses = Vec::with_capacity(entries.len());

    for (key, value) in entries {
        if !seen.insert(key.as_str()) {
            return Err(SelectorError::DuplicateKey { key: key.clone() });
        }

        let clause = match key.as_str() {
            AND_KEY => Clause::And(parse_array(AND_KEY, value)?),
            OR_KEY => Clause::Or(parse_array(OR_KEY, value)?),
            _ => match UnaryDirective::from_key(key) {
                Some(directive) => parse_unary(directive, value)?,
                None => parse_field(key, value)?,
            },
        };
        clauses.push(clause);
    }

    Ok(Selector::from_clauses(clauses))
}

/// Parse the operand of `$and`/`$or`
fn parse_array(combinator: &str, value: &SelectorDocument) -> Result<Vec<Selector>> {
    let SelectorDocument::Array(items) = value else {
        return Err(SelectorError::ExpectedArray {
            combinator: combinator.to_string(),
            value: value.to_string(),
        });
    };

    items
        .iter()
        .map(|item| match item {
            SelectorDocument::Object(entries) => parse_object(entries),
            SelectorDocument::Array(_) => Err(SelectorError::NestedArrayNotAllowed {
                value: item.to_string(),
            }),
            other => Err(SelectorError::InvalidSelectorElement {
                value: other.to_string(),
            }),
        })
        .collect()
}

fn parse_unary(directive: UnaryDirective, value: &SelectorDocument) -> Result<Clause> {
    match value {
        SelectorDocument::String(path) => Ok(Clause::Unary {
            directive,
            path: FieldPath::from(path.as_str()),
        }),
        other => Err(SelectorError::InvalidOperand {
            directive: directive.as_key().to_string(),
            value: other.to_string(),
        }),
    }
}

fn parse_field(key: &str, value: &SelectorDocument) -> Result<Clause> {
    let path = FieldPath::from(key);

    if let Some(scalar) = comparable(value) {
        return Ok(Clause::Equality {
            path,
            value: scalar,
        });
    }

    let SelectorDocument::Object(entries) = value else {
        return Err(SelectorError::InvalidFieldCondition {
            path: key.to_string(),
            value: value.to_string(),
        });
    };

    let [(op_key, operand)] = entries.as_slice() else {
        return Err(SelectorError::InvalidFieldCondition {
            path: key.to_string(),
            value: value.to_string(),
        });
    };

    let operator = if op_key == EXISTS_KEY {
        match comparable(operand) {
            Some(ComparableValue::Bool(present)) => FieldOperator::Exists(present),
            Some(_) => FieldOperator::Exists(true),
            None => return Err(invalid_operand(op_key, operand)),
        }
    } else if let Some(op) = CompareOp::from_key(op_key) {
        match comparable(operand) {
            Some(scalar) => FieldOperator::Compare(op, scalar),
            None => return Err(invalid_operand(op_key, operand)),
        }
    } else {
        return Err(SelectorError::InvalidOperator {
            operator: op_key.clone(),
            value: value.to_string(),
        });
    };

    Ok(Clause::Operator { path, operator })
}

fn comparable(value: &SelectorDocument) -> Option<ComparableValue> {
    match value {
        SelectorDocument::Bool(b) => Some(ComparableValue::Bool(*b)),
        SelectorDocument::Number(n) => Some(ComparableValue::Number(n.clone())),
        SelectorDocument::String(s) => Some(ComparableValue::String(s.clone())),
        _ => None,
    }
}

fn invalid_operand(directive: &str, value: &SelectorDocument) -> SelectorError {
    SelectorError::InvalidOperand {
        directive: directive.to_string(),
        value: value.to_string(),
    }
}
