//! Coercion of literal constants into bind values.

use crate::{
    ast::literal::Literal,
    error::{Result, SyntaxError},
};
use chrono::DateTime;
use model::core::value::Value;

/// Parses an RFC 3339 timestamp into Unix epoch seconds.
pub fn parse_timestamp(value: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|ts| ts.timestamp())
        .map_err(|e| SyntaxError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Converts a literal into the value bound for a timestamp column.
///
/// Integers are taken as epoch seconds already; strings must be RFC 3339.
/// Returns `Ok(None)` for literal types that can never denote a timestamp.
pub fn timestamp_value(lit: &Literal) -> Result<Option<Value>> {
    match lit {
        Literal::Int(secs) => Ok(Some(Value::Int(*secs))),
        Literal::String(s) => parse_timestamp(s).map(|secs| Some(Value::Int(secs))),
        Literal::Bool(_) => Ok(None),
    }
}

/// Wraps a literal for a substring `LIKE` match.
pub fn like_pattern(lit: &Literal) -> Value {
    let needle = match lit {
        Literal::String(s) => s.clone(),
        other => other.to_string(),
    };
    Value::String(format!("%{needle}%"))
}
