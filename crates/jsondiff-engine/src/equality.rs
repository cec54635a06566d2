//! Deep structural equality over JSON trees.
//!
//! This differs from `Value`'s derived `PartialEq` in two ways: a key missing
//! from one object compares as `null`, and numbers compare by numeric value
//! rather than by representation (`1` equals `1.0`).

use serde_json::{Map, Number, Value};

/// Compare two tree values structurally.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => objects_equal(a, b),
        (Value::Object(_), _) | (_, Value::Object(_)) => false,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Array(_), _) | (_, Value::Array(_)) => false,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        _ => false,
    }
}

fn objects_equal(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    let missing = Value::Null;
    let left = a
        .iter()
        .all(|(k, v)| deep_equal(v, b.get(k).unwrap_or(&missing)));
    // Keys only on the right still need to compare equal to null.
    let right = b
        .iter()
        .filter(|(k, _)| !a.contains_key(*k))
        .all(|(_, v)| deep_equal(&missing, v));
    left && right
}

/// Compare two JSON numbers by value.
///
/// Integers that fit the same integer type compare exactly; anything else
/// falls back to `f64` comparison.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Short name of a value's kind, used in error messages and logs.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
