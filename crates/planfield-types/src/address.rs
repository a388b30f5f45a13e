use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Separator between segments in the flat, dotted key encoding.
pub const SEPARATOR: char = '.';

/// Location of a value within a schema-shaped structure.
///
/// An `Address` is an ordered sequence of path segments: field names, list
/// indices and set element codes (both as decimal strings), or map keys.
/// Segments are resolved strictly left to right. The dotted string form used
/// by flat diffs is only produced by [`Address::join`], at lookup time.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(Vec<String>);

impl Address {
    /// Create an address from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a dotted path such as `"set.10.index"`.
    ///
    /// Every segment must be non-empty. Use [`Address::new`] when a segment
    /// (a map key, say) itself contains a dot.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.is_empty() {
            return Err(TypeError::InvalidAddress {
                input: s.to_string(),
                reason: "address must not be empty".into(),
            });
        }
        let segments: Vec<String> = s.split(SEPARATOR).map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(TypeError::InvalidAddress {
                input: s.to_string(),
                reason: "path segments must not be empty".into(),
            });
        }
        Ok(Self(segments))
    }

    /// A new address with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment.into());
        Self(segments)
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The innermost segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the address has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The dotted key this address maps to in a flat diff.
    pub fn join(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.join())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl From<Vec<String>> for Address {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for Address {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

impl<S: Into<String>> FromIterator<S> for Address {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
