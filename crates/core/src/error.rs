//! Error types for selector compilation
//!
//! Every failure is raised while interpreting the selector document, before
//! any SQL is produced. No partial predicate is ever returned.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for selector operations
pub type Result<T> = std::result::Result<T, SelectorError>;

/// Selector compilation errors
///
/// Offending values are carried as rendered JSON so the error stays
/// `Clone + PartialEq` and can be serialized alongside the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum SelectorError {
    /// Top-level selector is not an object
    #[error("selector root must be an object, got {value}")]
    InvalidSelectorRoot {
        /// Rendered input
        value: String,
    },

    /// `$and`/`$or` operand contains an array element
    #[error("nested array not allowed in logical selector: {value}")]
    NestedArrayNotAllowed {
        /// Rendered element
        value: String,
    },

    /// `$and`/`$or` operand contains a non-object element
    #[error("logical selector element must be an object, got {value}")]
    InvalidSelectorElement {
        /// Rendered element
        value: String,
    },

    /// `$and`/`$or` value is not an array
    #[error("{combinator} expects an array of selectors, got {value}")]
    ExpectedArray {
        /// `$and` or `$or`
        combinator: String,
        /// Rendered operand
        value: String,
    },

    /// Directive or operator operand has the wrong type
    #[error("invalid operand for {directive}: {value}")]
    InvalidOperand {
        /// Directive or operator key
        directive: String,
        /// Rendered operand
        value: String,
    },

    /// Field condition is neither a comparable value nor a single-key operator object
    #[error("invalid condition for field {path}: {value}")]
    InvalidFieldCondition {
        /// Field path the condition applies to
        path: String,
        /// Rendered condition
        value: String,
    },

    /// Operator key not in the recognized set
    #[error("invalid operator {operator} in {value}")]
    InvalidOperator {
        /// Offending operator key
        operator: String,
        /// Rendered enclosing operator object
        value: String,
    },

    /// The same key appears twice in one selector object
    #[error("duplicate key in selector object: {key}")]
    DuplicateKey {
        /// Repeated key
        key: String,
    },

    /// Selector text is not valid JSON
    #[error("malformed selector JSON: {reason}")]
    Json {
        /// Parser message
        reason: String,
    },
}

impl SelectorError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            SelectorError::InvalidSelectorRoot { .. } => "InvalidSelectorRoot",
            SelectorError::NestedArrayNotAllowed { .. } => "NestedArrayNotAllowed",
            SelectorError::InvalidSelectorElement { .. } => "InvalidSelectorElement",
            SelectorError::ExpectedArray { .. } => "ExpectedArray",
            SelectorError::InvalidOperand { .. } => "InvalidOperand",
            SelectorError::InvalidFieldCondition { .. } => "InvalidFieldCondition",
            SelectorError::InvalidOperator { .. } => "InvalidOperator",
            SelectorError::DuplicateKey { .. } => "DuplicateKey",
            SelectorError::Json { .. } => "Json",
        }
    }
}
