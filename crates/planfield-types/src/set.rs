use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::value::Value;

/// Unordered collection of decoded values identified by integer hash code.
///
/// Each member is stored under the code its writer assigned it. Observable
/// order is always ascending by code, never insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HashedSet {
    members: BTreeMap<i64, Value>,
}

impl HashedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `code`, returning the value it replaced.
    ///
    /// Codes are unique by construction, so a repeated code overwrites.
    pub fn insert(&mut self, code: i64, value: Value) -> Option<Value> {
        self.members.insert(code, value)
    }

    /// The member stored under `code`.
    pub fn get(&self, code: i64) -> Option<&Value> {
        self.members.get(&code)
    }

    /// Returns `true` if a member is stored under `code`.
    pub fn contains(&self, code: i64) -> bool {
        self.members.contains_key(&code)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = i64> + '_ {
        self.members.keys().copied()
    }

    /// `(code, member)` pairs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &Value)> {
        self.members.iter().map(|(code, value)| (*code, value))
    }

    /// Members as an ordered sequence, sorted by ascending code.
    pub fn to_vec(&self) -> Vec<Value> {
        self.members.values().cloned().collect()
    }
}

impl FromIterator<(i64, Value)> for HashedSet {
    fn from_iter<I: IntoIterator<Item = (i64, Value)>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl Serialize for HashedSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.members.len()))?;
        for value in self.members.values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}
