//! Ordered, duplicate-preserving view of a selector document
//!
//! `serde_json::Value` collapses repeated object keys while parsing, so a
//! selector like `{"$.a": 1, "$.a": 2}` would silently lose its first clause.
//! [`SelectorDocument`] keeps every entry in declaration order so the parser
//! can reject the repetition instead.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;

/// JSON tree with object entries kept as an ordered list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorDocument {
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number
    Number(serde_json::Number),
    /// JSON string
    String(String),
    /// JSON array
    Array(Vec<SelectorDocument>),
    /// JSON object, entries in declaration order (duplicates kept)
    Object(Vec<(String, SelectorDocument)>),
}

impl SelectorDocument {
    /// Parse JSON text, keeping duplicate keys
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl From<&serde_json::Value> for SelectorDocument {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => SelectorDocument::Null,
            serde_json::Value::Bool(b) => SelectorDocument::Bool(*b),
            serde_json::Value::Number(n) => SelectorDocument::Number(n.clone()),
            serde_json::Value::String(s) => SelectorDocument::String(s.clone()),
            serde_json::Value::Array(items) => {
                SelectorDocument::Array(items.iter().map(SelectorDocument::from).collect())
            }
            serde_json::Value::Object(map) => SelectorDocument::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), SelectorDocument::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for SelectorDocument {
    fn from(value: serde_json::Value) -> Self {
        SelectorDocument::from(&value)
    }
}

/// Compact JSON rendering, duplicates included
impl fmt::Display for SelectorDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorDocument::Null => f.write_str("null"),
            SelectorDocument::Bool(b) => write!(f, "{b}"),
            SelectorDocument::Number(n) => write!(f, "{n}"),
            SelectorDocument::String(s) => write!(f, "{}", serde_json::Value::from(s.as_str())),
            SelectorDocument::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            SelectorDocument::Object(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}:{value}", serde_json::Value::from(key.as_str()))?;
                }
                f.write_str("}")
            }
        }
    }
}

impl<'de> Deserialize<'de> for SelectorDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = SelectorDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(SelectorDocument::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(SelectorDocument::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(SelectorDocument::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        serde_json::Number::from_f64(v)
            .map(SelectorDocument::Number)
            .ok_or_else(|| E::custom(format!("non-finite number {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(SelectorDocument::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(SelectorDocument::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(SelectorDocument::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(SelectorDocument::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        SelectorDocument::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(SelectorDocument::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, SelectorDocument>()? {
            entries.push((key, value));
        }
        Ok(SelectorDocument::Object(entries))
    }
}
