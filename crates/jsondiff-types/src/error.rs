use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid path {input:?}: {reason}")]
    InvalidPath { input: String, reason: String },
}

impl TypeError {
    pub(crate) fn invalid_path(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
