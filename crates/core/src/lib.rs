//! Core types and the selector compiler for sqkv
//!
//! This crate is pure and performs no I/O:
//! - ComparableValue / FieldPath: selector operand types
//! - Selector: parsed selector tree (and its fluent builder)
//! - SelectorDocument: duplicate-preserving JSON view used by the parser
//! - sql: literal encoder and predicate builders
//! - compiler: selector to SQL predicate
//! - SelectorError: error taxonomy for malformed selectors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compiler;
pub mod error;
pub mod selector;
pub mod sql;
pub mod value;

pub use compiler::{compile, compile_array, compile_bound, compile_object, compile_selector};
pub use error::{Result, SelectorError};
pub use selector::{Clause, FieldOperator, Selector, SelectorDocument, UnaryDirective};
pub use sql::{BoundPredicate, CompareOp, Predicate};
pub use value::{ComparableValue, FieldPath};
