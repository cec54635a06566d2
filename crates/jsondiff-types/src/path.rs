use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Separator used by the dotted textual form of a [`Path`].
pub const SEPARATOR: char = '.';

/// Location of a node inside a JSON tree.
///
/// A `Path` is the ordered list of object keys walked from the root. The empty
/// path is the root itself. Two paths are equal iff they have the same
/// segments in the same order; there is no prefix or wildcard matching.
///
/// The textual form joins segments with `.` (`Relation.Name`). Keys that
/// themselves contain a `.` cannot be written that way, so such paths
/// serialize as an explicit list of segments instead.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PathRepr", into = "PathRepr")]
pub struct Path(Vec<String>);

impl Path {
    /// The root path (no segments).
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a dot-joined path such as `Relation.Name`.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        s.parse()
    }

    /// Returns `true` if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments of this path, root first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The last segment, or `None` at the root.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// A new path one level below this one.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(key.into());
        Self(segments)
    }

    /// The enclosing path, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.0.split_last().map(|(_, rest)| Self(rest.to_vec()))
    }

    /// This path re-rooted below `prefix`.
    pub fn prefixed(&self, prefix: &Path) -> Self {
        let mut segments = Vec::with_capacity(prefix.len() + self.len());
        segments.extend_from_slice(&prefix.0);
        segments.extend_from_slice(&self.0);
        Self(segments)
    }

    /// Returns `true` if `prefix` is an ancestor of, or equal to, this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Returns `true` if the dotted text form round-trips to this path.
    pub fn is_dot_safe(&self) -> bool {
        self.0
            .iter()
            .all(|s| !s.is_empty() && !s.contains(SEPARATOR))
    }

    /// Consume the path, returning its segments.
    pub fn into_segments(self) -> Vec<String> {
        self.0
    }
}

impl FromStr for Path {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        let segments: Vec<String> = s.split(SEPARATOR).map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return Err(TypeError::invalid_path(s, "empty segment"));
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({:?})", self.0)
    }
}

// Lets hash sets of paths be queried with a borrowed segment stack.
impl Borrow<[String]> for Path {
    fn borrow(&self) -> &[String] {
        &self.0
    }
}

impl AsRef<[String]> for Path {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

impl TryFrom<&str> for Path {
    type Error = TypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Serialized form: a dotted string when lossless, otherwise a segment list.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PathRepr {
    Dotted(String),
    Segments(Vec<String>),
}

impl TryFrom<PathRepr> for Path {
    type Error = TypeError;

    fn try_from(repr: PathRepr) -> Result<Self, Self::Error> {
        match repr {
            PathRepr::Dotted(s) => s.parse(),
            PathRepr::Segments(segments) => Ok(Self(segments)),
        }
    }
}

impl From<Path> for PathRepr {
    fn from(path: Path) -> Self {
        if path.is_dot_safe() {
            PathRepr::Dotted(path.to_string())
        } else {
            PathRepr::Segments(path.0)
        }
    }
}
