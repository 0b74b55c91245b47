//! SQL rendering: literal encoding and predicate builders

pub mod literal;
pub mod predicate;

pub use predicate::{BoundPredicate, CompareOp, Predicate, VALUE_COLUMN};
