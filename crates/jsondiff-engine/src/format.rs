//! Formatter strategies: how a divergence is stored in the result tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the previous value in a [`Format::BothAsPair`] entry.
pub const OLD_KEY: &str = "Old";
/// Key holding the current value in a [`Format::BothAsPair`] entry.
pub const NEW_KEY: &str = "New";

/// Converts an `(old, new)` divergence into the value stored at its key.
///
/// Called exactly once per divergence, with values that have already been
/// redacted. The engine stores the returned value as-is and never looks
/// inside it. Any `Fn(Value, Value) -> Value` closure is a formatter.
pub trait Formatter {
    fn format(&self, old: Value, new: Value) -> Value;
}

impl<F> Formatter for F
where
    F: Fn(Value, Value) -> Value,
{
    fn format(&self, old: Value, new: Value) -> Value {
        self(old, new)
    }
}

/// The built-in formatter strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Report what the value became.
    #[default]
    NewOnly,
    /// Report what the value was.
    OldOnly,
    /// Report both, as `{"Old": .., "New": ..}`.
    BothAsPair,
}

impl Formatter for Format {
    fn format(&self, old: Value, new: Value) -> Value {
        match self {
            Format::NewOnly => new,
            Format::OldOnly => old,
            Format::BothAsPair => pair(old, new),
        }
    }
}

/// Build a `{"Old": old, "New": new}` object.
pub fn pair(old: Value, new: Value) -> Value {
    let mut map = Map::new();
    map.insert(OLD_KEY.to_owned(), old);
    map.insert(NEW_KEY.to_owned(), new);
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_only_is_default() {
        assert_eq!(Format::default(), Format::NewOnly);
        assert_eq!(Format::NewOnly.format(json!(1), json!(2)), json!(2));
    }

    #[test]
    fn old_only() {
        assert_eq!(Format::OldOnly.format(json!(1), json!(2)), json!(1));
    }

    #[test]
    fn both_as_pair() {
        assert_eq!(
            Format::BothAsPair.format(json!(null), json!(1)),
            json!({"Old": null, "New": 1})
        );
    }

    #[test]
    fn closures_are_formatters() {
        let describe = |old: Value, new: Value| json!(format!("{old} -> {new}"));
        assert_eq!(describe.format(json!(1), json!(2)), json!("1 -> 2"));
    }

    #[test]
    fn serde_names() {
        assert_eq!(
            serde_json::to_string(&Format::BothAsPair).unwrap(),
            r#""both_as_pair""#
        );
        let parsed: Format = serde_json::from_str(r#""old_only""#).unwrap();
        assert_eq!(parsed, Format::OldOnly);
    }
}
