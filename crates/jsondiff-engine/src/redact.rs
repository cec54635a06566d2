//! Redaction walker: strip ignored keys from a value emitted wholesale.
//!
//! When the diff reports a whole value (a replaced array, a type change) the
//! ignored keys nested inside it must not leak into the output. Array elements
//! carry no path segment of their own, so every element is redacted at the
//! array's path.

use serde_json::{Map, Value};

use crate::ignore::IgnoreSet;

/// Copy `value`, dropping every object key `k` where `path + [k]` is ignored.
pub fn redact(value: &Value, path: &[String], ignore: &IgnoreSet) -> Value {
    if ignore.is_empty() {
        return value.clone();
    }
    let mut stack = path.to_vec();
    redact_at(value, &mut stack, ignore)
}

fn redact_at(value: &Value, path: &mut Vec<String>, ignore: &IgnoreSet) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, child) in map {
                path.push(key.clone());
                if !ignore.is_ignored(path) {
                    out.insert(key.clone(), redact_at(child, path, ignore));
                }
                path.pop();
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_at(item, path, ignore))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}
