//! Error types for the diff crate.

use std::fmt;

/// Which of the two inputs an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Old => f.write_str("old"),
            Side::New => f.write_str("new"),
        }
    }
}

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// An input could not be converted into a JSON tree.
    #[error("failed to normalize {side} value: {source}")]
    Normalization {
        side: Side,
        #[source]
        source: serde_json::Error,
    },

    /// An input normalized to something other than a JSON object.
    #[error("{side} value must be a JSON object, got {found}")]
    InvalidRootShape { side: Side, found: &'static str },

    /// The result tree could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl DiffError {
    /// The input side the error refers to, if any.
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::Normalization { side, .. } | Self::InvalidRootShape { side, .. } => Some(*side),
            Self::Encoding(_) => None,
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
