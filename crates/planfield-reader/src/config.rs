use serde::{Deserialize, Serialize};

use crate::error::{ReaderError, ReaderResult};

/// Tuning knobs for [`DiffFieldReader`](crate::DiffFieldReader).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Longest address the reader will descend to.
    pub max_depth: usize,
    /// Re-hash every decoded set member and require it to match the code it
    /// is stored under.
    pub verify_set_codes: bool,
    /// Fail when a list or set count disagrees with the elements present,
    /// instead of logging a warning.
    pub strict_counts: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            verify_set_codes: false,
            strict_counts: false,
        }
    }
}

impl ReaderConfig {
    /// A configuration that checks every consistency invariant it can.
    pub fn strict() -> Self {
        Self {
            verify_set_codes: true,
            strict_counts: true,
            ..Default::default()
        }
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> ReaderResult<Self> {
        toml::from_str(s).map_err(|e| ReaderError::Config(e.to_string()))
    }
}
