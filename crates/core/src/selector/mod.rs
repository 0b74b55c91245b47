//! Selector language
//!
//! ```text
//! Selector       := { (FieldPath | "$and" | "$or" | "$exists" | "$null" | "$notnull"): SelectorValue, ... }
//! SelectorValue  := ComparableValue | OperatorObject | SelectorArray | FieldPath
//! OperatorObject := { "$eq" | "$lt" | "$lte" | "$gt" | "$gte" | "$ne"
//!                   | "$like" | "$glob" | "$regexp" | "$exists": ComparableValue }
//! SelectorArray  := [ Selector, Selector, ... ]
//! ```
//!
//! Keys at one level are ANDed. `$and`/`$or` elements are each ANDed
//! internally and then joined by the combinator.

pub mod ast;
pub mod document;
pub mod parse;

pub use ast::{Clause, FieldOperator, Selector, UnaryDirective};
pub use document::SelectorDocument;

use crate::error::{Result, SelectorError};

impl Selector {
    /// Parse a selector from a JSON value
    ///
    /// The value has already collapsed any duplicate keys (last one wins,
    /// in the position of the first). Use [`Selector::from_json_str`] to
    /// have duplicates rejected.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        parse::parse(&SelectorDocument::from(value))
    }

    /// Parse a selector from JSON text, rejecting duplicate keys
    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc = SelectorDocument::from_json_str(text).map_err(|e| SelectorError::Json {
            reason: e.to_string(),
        })?;
        parse::parse(&doc)
    }
}

impl TryFrom<&serde_json::Value> for Selector {
    type Error = SelectorError;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        Selector::from_value(value)
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::from_json_str(s)
    }
}
