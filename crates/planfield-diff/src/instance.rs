//! The flat, path-keyed diff of one resource instance.

use std::collections::BTreeMap;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::attr::AttrDiff;
use crate::error::{DiffError, DiffResult};

/// Every attribute change of a resource instance, keyed by dotted path.
///
/// Keys are kept sorted, so all entries sharing a path prefix are contiguous
/// and [`InstanceDiff::prefixed`] visits only those entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDiff {
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrDiff>,
}

impl InstanceDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`InstanceDiff::insert`].
    pub fn with(mut self, key: impl Into<String>, attr: AttrDiff) -> Self {
        self.attributes.insert(key.into(), attr);
        self
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, attr: AttrDiff) -> Option<AttrDiff> {
        self.attributes.insert(key.into(), attr)
    }

    /// The entry stored at exactly `key`.
    pub fn get(&self, key: &str) -> Option<&AttrDiff> {
        self.attributes.get(key)
    }

    /// Returns `true` if an entry is stored at exactly `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// All entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrDiff)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries whose key starts with `prefix`, in key order.
    ///
    /// Runs in time proportional to the number of matching entries.
    pub fn prefixed<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a AttrDiff)> + 'a {
        self.attributes
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(prefix))
            .map(|(key, attr)| (key.as_str(), attr))
    }

    /// Check that every key is a well-formed dotted path.
    pub fn validate(&self) -> DiffResult<()> {
        for key in self.attributes.keys() {
            if key.is_empty() {
                return Err(DiffError::InvalidKey {
                    key: key.clone(),
                    reason: "key must not be empty".into(),
                });
            }
            if key.split('.').any(str::is_empty) {
                return Err(DiffError::InvalidKey {
                    key: key.clone(),
                    reason: "path segments must not be empty".into(),
                });
            }
        }
        Ok(())
    }

    /// Load and validate a diff from its JSON document form.
    pub fn from_json(json: &str) -> DiffResult<Self> {
        let diff: Self =
            serde_json::from_str(json).map_err(|e| DiffError::Serialization(e.to_string()))?;
        diff.validate()?;
        Ok(diff)
    }

    /// Render the diff as a pretty-printed JSON document.
    pub fn to_json(&self) -> DiffResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiffError::Serialization(e.to_string()))
    }
}

impl<K: Into<String>> FromIterator<(K, AttrDiff)> for InstanceDiff {
    fn from_iter<I: IntoIterator<Item = (K, AttrDiff)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
