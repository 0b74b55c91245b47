//! `REGEXP` support
//!
//! SQLite parses `X REGEXP Y` but ships no implementation; it calls a user
//! function `regexp(Y, X)`. This registers one backed by the `regex` crate.
//! Compiled patterns are cached in SQLite auxdata, so a pattern is compiled
//! once per statement rather than once per row.

use regex::Regex;
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Error};
use std::borrow::Cow;
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// SQL name of the registered function
pub const REGEXP_FUNCTION: &str = "regexp";

/// Register `regexp(pattern, text)` on a connection
///
/// Numeric patterns and subjects are used as their decimal text. A NULL
/// subject yields NULL, so documents missing the path never match.
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        REGEXP_FUNCTION,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        regexp_match,
    )
}

fn regexp_match(ctx: &Context<'_>) -> rusqlite::Result<Option<bool>> {
    let pattern: Arc<Regex> = ctx.get_or_create_aux(0, |vr| -> Result<_, BoxError> {
        match as_text(vr)? {
            Some(text) => Ok(Regex::new(&text)?),
            None => Err("REGEXP pattern is NULL".into()),
        }
    })?;

    let Some(subject) = as_text(ctx.get_raw(1)).map_err(Error::UserFunctionError)? else {
        return Ok(None);
    };

    Ok(Some(pattern.is_match(&subject)))
}

/// Text form of a SQL value; `None` for NULL
fn as_text(value: ValueRef<'_>) -> Result<Option<Cow<'_, str>>, BoxError> {
    let text = match value {
        ValueRef::Null => return Ok(None),
        ValueRef::Integer(i) => Cow::Owned(i.to_string()),
        ValueRef::Real(f) => Cow::Owned(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Cow::Borrowed(std::str::from_utf8(bytes)?),
    };
    Ok(Some(text))
}
