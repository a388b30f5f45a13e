use serde::{Deserialize, Serialize};

/// A single flat diff entry.
///
/// `old` and `new` hold the canonical string encoding of the primitive at this
/// path (`"true"`, `"42"`, `"foo"`, or a decimal count for `#` keys).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttrDiff {
    /// Value before the change.
    pub old: String,
    /// Value after the change.
    pub new: String,
    /// The new value is not known until the change is applied.
    pub new_computed: bool,
    /// The attribute is being removed.
    pub new_removed: bool,
}

impl AttrDiff {
    /// An entry changing `old` to `new`.
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
            ..Default::default()
        }
    }

    /// An entry that is being added with value `new`.
    pub fn added(new: impl Into<String>) -> Self {
        Self::new("", new)
    }

    /// An entry whose new value is not yet known.
    pub fn computed(old: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new_computed: true,
            ..Default::default()
        }
    }

    /// An entry that is being removed.
    pub fn removed(old: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new_removed: true,
            ..Default::default()
        }
    }
}
