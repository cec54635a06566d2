//! The `Differ` entry point and the convenience functions built on it.
//!
//! Inputs are normalized with `serde_json::to_value`; both must become JSON
//! objects. Output is compact JSON with keys sorted at every level.

use jsondiff_types::Path;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::DiffConfig;
use crate::equality::kind_name;
use crate::error::{DiffError, DiffResult, Side};
use crate::format::{Format, Formatter};
use crate::ignore::{IgnoreSet, Ignorable};
use crate::tree_diff::{diff_objects, diff_objects_report, DiffReport};

/// A configured diff: ignore paths plus a formatter.
///
/// ```rust
/// use jsondiff_engine::{Differ, Format};
/// use serde_json::json;
///
/// let differ = Differ::new()
///     .with_format(Format::BothAsPair)
///     .ignore(["UpdatedAt"]);
/// let out = differ
///     .diff(&json!({"ID": 1, "UpdatedAt": 5}), &json!({"ID": 2, "UpdatedAt": 6}))
///     .unwrap();
/// assert_eq!(out, br#"{"ID":{"New":2,"Old":1}}"#);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Differ<F = Format> {
    ignore: IgnoreSet,
    formatter: F,
    pretty: bool,
}

impl Differ<Format> {
    /// A differ reporting new values, ignoring nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A differ built from a configuration.
    pub fn from_config(config: &DiffConfig) -> Self {
        Self {
            ignore: config.ignore_set(),
            formatter: config.format,
            pretty: config.pretty,
        }
    }

    /// A differ that skips the paths `T` declares.
    pub fn for_type<T: Ignorable>() -> Self {
        Self::new().ignore_type::<T>()
    }

    /// Use one of the built-in formatter strategies.
    pub fn with_format(self, format: Format) -> Self {
        self.with_formatter(format)
    }
}

impl<F: Formatter> Differ<F> {
    /// Replace the formatter.
    pub fn with_formatter<G: Formatter>(self, formatter: G) -> Differ<G> {
        Differ {
            ignore: self.ignore,
            formatter,
            pretty: self.pretty,
        }
    }

    /// Ignore an additional path.
    pub fn ignore(mut self, path: impl Into<Path>) -> Self {
        self.ignore.insert(path.into());
        self
    }

    /// Ignore every path in `paths`.
    pub fn ignore_all(mut self, paths: impl IntoIterator<Item = Path>) -> Self {
        self.ignore.extend(paths);
        self
    }

    /// Ignore the paths `T` declares.
    pub fn ignore_type<T: Ignorable>(self) -> Self {
        self.ignore_all(T::ignored_paths())
    }

    /// Indent encoded output.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// The active ignore set.
    pub fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Diff two serializable values into encoded JSON.
    pub fn diff<T, U>(&self, old: &T, new: &U) -> DiffResult<Vec<u8>>
    where
        T: Serialize + ?Sized,
        U: Serialize + ?Sized,
    {
        let tree = self.diff_tree(old, new)?;
        self.encode(&tree)
    }

    /// Diff two serializable values into a change tree.
    pub fn diff_tree<T, U>(&self, old: &T, new: &U) -> DiffResult<Map<String, Value>>
    where
        T: Serialize + ?Sized,
        U: Serialize + ?Sized,
    {
        let old = normalize(old, Side::Old)?;
        let new = normalize(new, Side::New)?;
        let tree = diff_objects(&old, &new, &self.ignore, &self.formatter);
        debug!(changed = tree.len(), ignored = self.ignore.len(), "diff complete");
        Ok(tree)
    }

    /// Diff two already-normalized trees.
    pub fn diff_values(&self, old: &Value, new: &Value) -> DiffResult<Map<String, Value>> {
        let old = root_object(old, Side::Old)?;
        let new = root_object(new, Side::New)?;
        let tree = diff_objects(old, new, &self.ignore, &self.formatter);
        debug!(changed = tree.len(), ignored = self.ignore.len(), "diff complete");
        Ok(tree)
    }

    /// Diff two serializable values, recording every divergence.
    pub fn report<T, U>(&self, old: &T, new: &U) -> DiffResult<DiffReport>
    where
        T: Serialize + ?Sized,
        U: Serialize + ?Sized,
    {
        let old = normalize(old, Side::Old)?;
        let new = normalize(new, Side::New)?;
        let report = diff_objects_report(&old, &new, &self.ignore, &self.formatter);
        debug!(
            divergences = report.len(),
            added = report.additions(),
            removed = report.removals(),
            "diff report complete"
        );
        Ok(report)
    }

    /// Encode a change tree with sorted keys.
    pub fn encode(&self, tree: &Map<String, Value>) -> DiffResult<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(tree)?
        } else {
            serde_json::to_vec(tree)?
        };
        Ok(bytes)
    }
}

fn normalize<T: Serialize + ?Sized>(value: &T, side: Side) -> DiffResult<Map<String, Value>> {
    let value =
        serde_json::to_value(value).map_err(|source| DiffError::Normalization { side, source })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DiffError::InvalidRootShape {
            side,
            found: kind_name(&other),
        }),
    }
}

fn root_object(value: &Value, side: Side) -> DiffResult<&Map<String, Value>> {
    value.as_object().ok_or(DiffError::InvalidRootShape {
        side,
        found: kind_name(value),
    })
}

/// Diff two values, reporting what each changed key became.
pub fn diff<T, U>(old: &T, new: &U) -> DiffResult<Vec<u8>>
where
    T: Serialize + ?Sized,
    U: Serialize + ?Sized,
{
    Differ::new().diff(old, new)
}

/// Diff two values, reporting `{"Old": .., "New": ..}` for each changed key.
pub fn diff_old_new<T, U>(old: &T, new: &U) -> DiffResult<Vec<u8>>
where
    T: Serialize + ?Sized,
    U: Serialize + ?Sized,
{
    Differ::new().with_format(Format::BothAsPair).diff(old, new)
}

/// Diff two values with a caller-supplied formatter.
pub fn diff_format<T, U, F>(old: &T, new: &U, formatter: F) -> DiffResult<Vec<u8>>
where
    T: Serialize + ?Sized,
    U: Serialize + ?Sized,
    F: Formatter,
{
    Differ::new().with_formatter(formatter).diff(old, new)
}

/// Diff two values of a type that declares its own ignored fields.
pub fn diff_ignorable<T>(old: &T, new: &T) -> DiffResult<Vec<u8>>
where
    T: Serialize + Ignorable,
{
    Differ::for_type::<T>().diff(old, new)
}
