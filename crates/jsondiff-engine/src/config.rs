use jsondiff_types::Path;
use serde::{Deserialize, Serialize};

use crate::format::Format;
use crate::ignore::IgnoreSet;

/// Configuration for a diff run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// How divergences are written into the result tree.
    pub format: Format,
    /// Paths excluded from comparison and output.
    pub ignore: Vec<Path>,
    /// Whether encoded output is indented.
    pub pretty: bool,
}

impl DiffConfig {
    /// Configuration reporting both sides of every divergence.
    pub fn old_new() -> Self {
        Self {
            format: Format::BothAsPair,
            ..Default::default()
        }
    }

    /// The ignore paths as a lookup set.
    pub fn ignore_set(&self) -> IgnoreSet {
        self.ignore.iter().cloned().collect()
    }
}
