//! Tree-level diff: walk two JSON objects together and build the change tree.
//!
//! For every key in the union of both objects the walk either skips it
//! (ignored path), recurses (both sides are objects), or reports it whole
//! through the formatter (any other divergence). Arrays are never compared
//! element-wise: a difference anywhere replaces the whole array.

use std::collections::BTreeSet;

use jsondiff_types::Path;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::equality::deep_equal;
use crate::format::Formatter;
use crate::ignore::IgnoreSet;
use crate::redact::redact;

/// How a reported key differs between the two inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceKind {
    /// The key is absent from the old object.
    Added,
    /// The key is absent from the new object.
    Removed,
    /// Both sides hold non-object values that differ.
    Modified,
    /// Exactly one side holds an object.
    TypeChanged,
}

/// A single reported divergence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Divergence {
    /// Where the divergence was found.
    pub path: Path,
    /// What kind of change it is.
    pub kind: DivergenceKind,
}

/// The result tree together with the list of divergences that produced it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiffReport {
    /// The minimal change tree.
    pub tree: Map<String, Value>,
    /// Every divergence, in walk order (keys sorted at each level).
    pub divergences: Vec<Divergence>,
}

impl DiffReport {
    /// Returns `true` if the inputs did not diverge.
    pub fn is_empty(&self) -> bool {
        self.divergences.is_empty()
    }

    /// Number of divergences.
    pub fn len(&self) -> usize {
        self.divergences.len()
    }

    /// Number of added keys.
    pub fn additions(&self) -> usize {
        self.count(DivergenceKind::Added)
    }

    /// Number of removed keys.
    pub fn removals(&self) -> usize {
        self.count(DivergenceKind::Removed)
    }

    /// Number of modified values.
    pub fn modifications(&self) -> usize {
        self.count(DivergenceKind::Modified)
    }

    /// Number of object/non-object type changes.
    pub fn type_changes(&self) -> usize {
        self.count(DivergenceKind::TypeChanged)
    }

    fn count(&self, kind: DivergenceKind) -> usize {
        self.divergences.iter().filter(|d| d.kind == kind).count()
    }
}

/// Diff two objects, returning only the change tree.
pub fn diff_objects(
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    ignore: &IgnoreSet,
    formatter: &dyn Formatter,
) -> Map<String, Value> {
    let mut walker = TreeWalker::new(ignore, formatter, false);
    let mut path = Vec::new();
    walker.diff(old, new, &mut path)
}

/// Diff two objects, recording every divergence alongside the change tree.
pub fn diff_objects_report(
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    ignore: &IgnoreSet,
    formatter: &dyn Formatter,
) -> DiffReport {
    let mut walker = TreeWalker::new(ignore, formatter, true);
    let mut path = Vec::new();
    let tree = walker.diff(old, new, &mut path);
    DiffReport {
        tree,
        divergences: walker.divergences,
    }
}

struct TreeWalker<'a> {
    ignore: &'a IgnoreSet,
    formatter: &'a dyn Formatter,
    record: bool,
    divergences: Vec<Divergence>,
}

impl<'a> TreeWalker<'a> {
    fn new(ignore: &'a IgnoreSet, formatter: &'a dyn Formatter, record: bool) -> Self {
        Self {
            ignore,
            formatter,
            record,
            divergences: Vec::new(),
        }
    }

    fn diff(
        &mut self,
        old: &Map<String, Value>,
        new: &Map<String, Value>,
        path: &mut Vec<String>,
    ) -> Map<String, Value> {
        let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
        let mut result = Map::new();

        for key in keys {
            path.push(key.clone());
            if !self.ignore.is_ignored(path) {
                if let Some(entry) = self.diff_entry(old.get(key), new.get(key), path) {
                    result.insert(key.clone(), entry);
                }
            }
            path.pop();
        }

        result
    }

    fn diff_entry(
        &mut self,
        old: Option<&Value>,
        new: Option<&Value>,
        path: &mut Vec<String>,
    ) -> Option<Value> {
        let old_val = old.unwrap_or(&Value::Null);
        let new_val = new.unwrap_or(&Value::Null);

        match (old_val, new_val) {
            (Value::Object(a), Value::Object(b)) => {
                let sub = self.diff(a, b, path);
                (!sub.is_empty()).then_some(Value::Object(sub))
            }
            (Value::Object(_), _) | (_, Value::Object(_)) => {
                let kind = match (old, new) {
                    (None, _) => DivergenceKind::Added,
                    (_, None) => DivergenceKind::Removed,
                    _ => DivergenceKind::TypeChanged,
                };
                Some(self.emit(old_val, new_val, path, kind))
            }
            _ if deep_equal(old_val, new_val) => None,
            _ => {
                let kind = match (old, new) {
                    (None, _) => DivergenceKind::Added,
                    (_, None) => DivergenceKind::Removed,
                    _ => DivergenceKind::Modified,
                };
                Some(self.emit(old_val, new_val, path, kind))
            }
        }
    }

    fn emit(&mut self, old: &Value, new: &Value, path: &[String], kind: DivergenceKind) -> Value {
        trace!(path = %path.join("."), ?kind, "divergence");
        if self.record {
            self.divergences.push(Divergence {
                path: Path::from(path.to_vec()),
                kind,
            });
        }
        self.formatter
            .format(redact(old, path, self.ignore), redact(new, path, self.ignore))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn run(old: Value, new: Value, format: Format, ignore: &[&str]) -> Value {
        let set = IgnoreSet::parse(ignore.iter().copied()).unwrap();
        Value::Object(diff_objects(&obj(old), &obj(new), &set, &format))
    }

    fn run_new(old: Value, new: Value) -> Value {
        run(old, new, Format::NewOnly, &[])
    }

    #[test]
    fn identical_objects_no_diff() {
        let value = json!({"ID": 1, "Name": "John"});
        assert_eq!(run_new(value.clone(), value), json!({}));
    }

    #[test]
    fn scalar_change_new_only() {
        assert_eq!(run_new(json!({"ID": 1}), json!({"ID": 2})), json!({"ID": 2}));
    }

    #[test]
    fn scalar_change_old_only() {
        assert_eq!(
            run(json!({"ID": 1}), json!({"ID": 2}), Format::OldOnly, &[]),
            json!({"ID": 1})
        );
    }

    #[test]
    fn scalar_change_both_as_pair() {
        assert_eq!(
            run(json!({"ID": 1}), json!({"ID": 2}), Format::BothAsPair, &[]),
            json!({"ID": {"Old": 1, "New": 2}})
        );
    }

    #[test]
    fn added_key_reports_null_old() {
        assert_eq!(
            run(json!({}), json!({"prop": 1}), Format::BothAsPair, &[]),
            json!({"prop": {"Old": null, "New": 1}})
        );
    }

    #[test]
    fn removed_key_reports_null_new() {
        assert_eq!(run_new(json!({"prop": 1}), json!({})), json!({"prop": null}));
    }

    #[test]
    fn absent_and_null_are_equal() {
        assert_eq!(run_new(json!({"a": null}), json!({})), json!({}));
        assert_eq!(run_new(json!({}), json!({"a": null})), json!({}));
    }

    #[test]
    fn nested_change_surfaces_only_leaf() {
        let old = json!({"Relation": {"ID": 2, "Name": "asdf"}});
        let new = json!({"Relation": {"ID": 12, "Name": "asdf"}});
        assert_eq!(run_new(old, new), json!({"Relation": {"ID": 12}}));
    }

    #[test]
    fn unchanged_nested_object_is_omitted() {
        let value = json!({"ID": 2, "Relation": {"ID": 2, "Name": "asdf", "Relation": null}});
        let mut changed = value.clone();
        changed["ID"] = json!(3);
        assert_eq!(run_new(value, changed), json!({"ID": 3}));
    }

    #[test]
    fn null_to_object_is_reported_whole() {
        let old = json!({"ID": 1, "Name": "asdf", "Relation": null});
        let new = json!({
            "ID": 2,
            "Name": "asdf",
            "Relation": {"ID": 2, "Name": "asdf", "Relation": null}
        });
        assert_eq!(
            run_new(old, new),
            json!({"ID": 2, "Relation": {"ID": 2, "Name": "asdf", "Relation": null}})
        );
    }

    #[test]
    fn object_to_scalar_is_reported_whole() {
        assert_eq!(
            run(json!({"a": {"b": 1}}), json!({"a": 5}), Format::BothAsPair, &[]),
            json!({"a": {"Old": {"b": 1}, "New": 5}})
        );
    }

    #[test]
    fn empty_object_vs_missing_is_a_change() {
        assert_eq!(run_new(json!({}), json!({"a": {}})), json!({"a": {}}));
    }

    #[test]
    fn arrays_replaced_whole() {
        assert_eq!(
            run_new(json!({"List": [3, 2, 1]}), json!({"List": [1, 2, 3]})),
            json!({"List": [1, 2, 3]})
        );
    }

    #[test]
    fn array_single_element_change_replaces_whole() {
        let old = json!({"List": [{"a": 1}, {"a": 2}, {"a": 3}]});
        let new = json!({"List": [{"a": 1}, {"a": 9}, {"a": 3}]});
        assert_eq!(
            run_new(old, new),
            json!({"List": [{"a": 1}, {"a": 9}, {"a": 3}]})
        );
    }

    #[test]
    fn equal_arrays_omitted() {
        assert_eq!(run_new(json!({"l": [1, 2]}), json!({"l": [1, 2]})), json!({}));
    }

    #[test]
    fn array_to_scalar_reported() {
        assert_eq!(run_new(json!({"l": [1]}), json!({"l": 1})), json!({"l": 1}));
    }

    #[test]
    fn int_and_float_are_equal() {
        assert_eq!(run_new(json!({"n": 1}), json!({"n": 1.0})), json!({}));
    }

    #[test]
    fn ignored_top_level_key_skipped() {
        assert_eq!(
            run(json!({"ID": 1, "Name": "a"}), json!({"ID": 2, "Name": "b"}), Format::NewOnly, &["Name"]),
            json!({"ID": 2})
        );
    }

    #[test]
    fn ignored_nested_key_skipped() {
        let old = json!({"Relation": {"ID": 2, "Name": "asdf"}});
        let new = json!({"Relation": {"ID": 2, "Name": "qwer"}});
        assert_eq!(
            run(old, new, Format::NewOnly, &["Relation.Name"]),
            json!({})
        );
    }

    #[test]
    fn ignore_is_exact_not_prefix() {
        let old = json!({"Name": "a", "Relation": {"Name": "a"}});
        let new = json!({"Name": "b", "Relation": {"Name": "b"}});
        assert_eq!(
            run(old, new, Format::NewOnly, &["Relation.Name"]),
            json!({"Name": "b"})
        );
    }

    #[test]
    fn ignored_object_key_not_recursed() {
        let old = json!({"Meta": {"a": 1}});
        let new = json!({"Meta": 7});
        assert_eq!(run(old, new, Format::NewOnly, &["Meta"]), json!({}));
    }

    #[test]
    fn ignored_keys_redacted_from_wholesale_values() {
        let old = json!({"ID": 1, "Relation": null});
        let new = json!({"ID": 1, "Relation": {"ID": 2, "Name": "asdf"}});
        assert_eq!(
            run(old, new, Format::BothAsPair, &["Relation.Name"]),
            json!({"Relation": {"Old": null, "New": {"ID": 2}}})
        );
    }

    #[test]
    fn ignored_keys_redacted_inside_replaced_arrays() {
        let old = json!({"Items": [{"Id": 1, "Etag": "x"}]});
        let new = json!({"Items": [{"Id": 2, "Etag": "y"}]});
        assert_eq!(
            run(old, new, Format::BothAsPair, &["Items.Etag"]),
            json!({"Items": {"Old": [{"Id": 1}], "New": [{"Id": 2}]}})
        );
    }

    #[test]
    fn formatter_called_once_per_divergence() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let counting = |_old: Value, new: Value| {
            calls.set(calls.get() + 1);
            new
        };
        let old = obj(json!({"a": 1, "b": {"c": 1, "d": [1]}, "e": "same"}));
        let new = obj(json!({"a": 2, "b": {"c": 2, "d": [2]}, "e": "same"}));
        diff_objects(&old, &new, &IgnoreSet::new(), &counting);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn report_records_kinds_and_paths() {
        let old = obj(json!({"keep": 1, "mod": 1, "gone": 1, "nest": {"x": {}}}));
        let new = obj(json!({"keep": 1, "mod": 2, "new": 1, "nest": {"x": 3}}));
        let report = diff_objects_report(&old, &new, &IgnoreSet::new(), &Format::NewOnly);

        assert_eq!(report.len(), 4);
        assert_eq!(report.additions(), 1);
        assert_eq!(report.removals(), 1);
        assert_eq!(report.modifications(), 1);
        assert_eq!(report.type_changes(), 1);

        let paths: Vec<String> = report.divergences.iter().map(|d| d.path.to_string()).collect();
        assert_eq!(paths, vec!["gone", "mod", "nest.x", "new"]);
        assert_eq!(
            Value::Object(report.tree),
            json!({"gone": null, "mod": 2, "nest": {"x": 3}, "new": 1})
        );
    }

    #[test]
    fn report_empty_for_identical() {
        let value = obj(json!({"a": [1, {"b": 2}]}));
        let report = diff_objects_report(&value, &value, &IgnoreSet::new(), &Format::NewOnly);
        assert!(report.is_empty());
        assert!(report.tree.is_empty());
    }
}
