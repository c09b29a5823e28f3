//! Field coercion primitive

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Semantic type of a declared record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Text field (device name)
    String,
    /// Non-negative integer field (byte counts, indices)
    Integer,
}

/// A coerced field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(u64),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            FieldValue::Int(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            FieldValue::Str(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
        }
    }
}

/// Coerce a raw value to the declared field type.
///
/// Strings accept any scalar; integers accept non-negative JSON integers and
/// decimal strings. Anything else is a validation error naming `field`.
pub fn coerce(field: &str, raw: &Value, field_type: FieldType) -> Result<FieldValue> {
    match field_type {
        FieldType::String => coerce_string(field, raw),
        FieldType::Integer => coerce_integer(field, raw),
    }
}

fn coerce_string(field: &str, raw: &Value) -> Result<FieldValue> {
    match raw {
        Value::String(s) => Ok(FieldValue::Str(s.clone())),
        Value::Number(n) => Ok(FieldValue::Str(n.to_string())),
        Value::Bool(b) => Ok(FieldValue::Str(b.to_string())),
        other => Err(mismatch(field, other, "a string")),
    }
}

fn coerce_integer(field: &str, raw: &Value) -> Result<FieldValue> {
    match raw {
        Value::Number(n) => n
            .as_u64()
            .map(FieldValue::Int)
            .ok_or_else(|| mismatch(field, raw, "a non-negative integer")),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map(FieldValue::Int)
            .map_err(|_| mismatch(field, raw, "a non-negative integer")),
        other => Err(mismatch(field, other, "a non-negative integer")),
    }
}

fn mismatch(field: &str, raw: &Value, expected: &str) -> Error {
    Error::Validation(format!(
        "Field {} expects {}, got {}",
        field, expected, raw
    ))
}
