use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::schema::SchemaKind;
use crate::set::HashedSet;

/// A decoded, typed value.
///
/// Serializes to natural JSON: sets become arrays in ascending code order,
/// maps and records become objects.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Set(HashedSet),
    Record(BTreeMap<String, Value>),
}

impl Value {
    /// The schema kind this value belongs to.
    pub fn kind(&self) -> SchemaKind {
        match self {
            Self::Bool(_) => SchemaKind::Bool,
            Self::Int(_) => SchemaKind::Int,
            Self::String(_) => SchemaKind::String,
            Self::List(_) => SchemaKind::List,
            Self::Map(_) => SchemaKind::Map,
            Self::Set(_) => SchemaKind::Set,
            Self::Record(_) => SchemaKind::Record,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&HashedSet> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Deterministic string form used for hashing.
    ///
    /// Primitives render as their flat encoding. Collections render each
    /// member followed by `;`, with map and record members as `key=value;`
    /// in key order and set members in ascending code order.
    pub fn canonical_string(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }

    fn write_canonical(&self, out: &mut String) {
        match self {
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Int(i) => {
                let _ = write!(out, "{i}");
            }
            Self::String(s) => out.push_str(s),
            Self::List(items) => {
                for item in items {
                    item.write_canonical(out);
                    out.push(';');
                }
            }
            Self::Set(set) => {
                for item in set.iter().map(|(_, v)| v) {
                    item.write_canonical(out);
                    out.push(';');
                }
            }
            Self::Map(entries) | Self::Record(entries) => {
                for (key, value) in entries {
                    out.push_str(key);
                    out.push('=');
                    value.write_canonical(out);
                    out.push(';');
                }
            }
        }
    }

    /// Convert to a `serde_json::Value`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(i) => Json::from(*i),
            Self::String(s) => Json::String(s.clone()),
            Self::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Self::Set(set) => Json::Array(set.iter().map(|(_, v)| v.to_json()).collect()),
            Self::Map(entries) | Self::Record(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
