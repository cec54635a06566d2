//! Diff engine for jsondiff.
//!
//! Compares two values by normalizing each to a JSON tree and producing a
//! minimal tree holding only the keys whose values changed. Objects are
//! compared key by key; arrays and scalars are reported whole.
//!
//! # Key Types
//!
//! - [`Differ`] -- Configured diff (ignore paths, formatter, output style)
//! - [`Formatter`] / [`Format`] -- How a divergence is written into the result
//! - [`IgnoreSet`] / [`Ignorable`] -- Paths excluded from comparison and output
//! - [`DiffReport`] / [`Divergence`] -- Change tree plus the list of divergences
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! let old = json!({"ID": 1, "Relation": {"ID": 2, "Name": "asdf"}});
//! let new = json!({"ID": 1, "Relation": {"ID": 12, "Name": "asdf"}});
//!
//! let out = jsondiff_engine::diff(&old, &new).unwrap();
//! assert_eq!(out, br#"{"Relation":{"ID":12}}"#);
//!
//! let out = jsondiff_engine::diff_old_new(&old, &new).unwrap();
//! assert_eq!(out, br#"{"Relation":{"ID":{"New":12,"Old":2}}}"#);
//! ```

pub mod config;
pub mod differ;
pub mod equality;
pub mod error;
pub mod format;
pub mod ignore;
pub mod redact;
pub mod tree_diff;

pub use config::DiffConfig;
pub use differ::{diff, diff_format, diff_ignorable, diff_old_new, Differ};
pub use equality::deep_equal;
pub use error::{DiffError, DiffResult, Side};
pub use format::{Format, Formatter};
pub use ignore::{nested, IgnoreSet, Ignorable};
pub use jsondiff_types::Path;
pub use redact::redact;
pub use tree_diff::{diff_objects, diff_objects_report, DiffReport, Divergence, DivergenceKind};
