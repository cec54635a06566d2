//! Ignore index: paths whose values never appear in a diff.

use std::collections::HashSet;

use jsondiff_types::{Path, TypeError};

/// A set of paths excluded from comparison and output.
///
/// Membership is an exact match. Ignoring `Relation.Name` hides that key
/// and nothing else: neither `Relation` nor a sibling `Name` at another depth
/// is affected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    paths: HashSet<Path>,
}

impl IgnoreSet {
    /// Create an empty ignore set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an ignore set from dot-joined path strings.
    pub fn parse<I, S>(paths: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .map(|p| Path::parse(p.as_ref()))
            .collect()
    }

    /// Add a path. Returns `false` if it was already present.
    pub fn insert(&mut self, path: Path) -> bool {
        self.paths.insert(path)
    }

    /// Returns `true` if exactly `path` is ignored.
    ///
    /// Accepts a plain segment slice so callers walking a tree can query with
    /// their key stack.
    pub fn is_ignored(&self, path: &[String]) -> bool {
        !self.paths.is_empty() && self.paths.contains(path)
    }

    /// Returns `true` if no paths are ignored.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of ignored paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Iterate over the ignored paths in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }
}

impl FromIterator<Path> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl Extend<Path> for IgnoreSet {
    fn extend<I: IntoIterator<Item = Path>>(&mut self, iter: I) {
        self.paths.extend(iter);
    }
}

/// A type that declares which of its serialized fields a diff must skip.
///
/// Implementations list paths relative to the type's own serialized object.
/// Fields holding other `Ignorable` types can pull in their paths with
/// [`nested`].
///
/// ```rust
/// use jsondiff_engine::{nested, Ignorable, Path};
///
/// struct Account { id: u64, password_hash: String }
/// struct Session { account: Account, token: String }
///
/// impl Ignorable for Account {
///     fn ignored_paths() -> Vec<Path> {
///         vec![Path::from(["password_hash"])]
///     }
/// }
///
/// impl Ignorable for Session {
///     fn ignored_paths() -> Vec<Path> {
///         let mut paths = vec![Path::from(["token"])];
///         paths.extend(nested::<Account>("account"));
///         paths
///     }
/// }
///
/// assert!(Session::ignored_paths().contains(&Path::from(["account", "password_hash"])));
/// ```
pub trait Ignorable {
    /// Paths to ignore, relative to this type's root object.
    fn ignored_paths() -> Vec<Path> {
        Vec::new()
    }
}

/// The ignored paths of `T`, re-rooted below the field `field`.
pub fn nested<T: Ignorable>(field: &str) -> impl Iterator<Item = Path> {
    let prefix = Path::from([field]);
    T::ignored_paths()
        .into_iter()
        .map(move |p| p.prefixed(&prefix))
}
