//! Foundation types for jsondiff.
//!
//! This crate provides the addressing types shared by the diff engine and its
//! callers. Every other jsondiff crate depends on `jsondiff-types`.
//!
//! # Key Types
//!
//! - [`Path`] — Root-relative sequence of object keys locating a node in a tree
//! - [`TypeError`] — Errors from parsing textual paths

pub mod error;
pub mod path;

pub use error::TypeError;
pub use path::Path;
