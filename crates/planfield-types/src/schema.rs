//! Schema model: the shape a decoded value is expected to have.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::hashcode;
use crate::set::HashedSet;
use crate::value::Value;

/// The closed set of value kinds a schema can describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaKind {
    Bool,
    Int,
    String,
    List,
    Map,
    Set,
    Record,
}

impl SchemaKind {
    /// Returns `true` for bool, int and string.
    pub fn is_primitive(self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::String)
    }

    /// Lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::String => "string",
            Self::List => "list",
            Self::Map => "map",
            Self::Set => "set",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Function assigning a set element its deterministic integer code.
///
/// Cheap to clone; the function itself is shared.
#[derive(Clone)]
pub struct HashFn(Arc<dyn Fn(&Value) -> i64 + Send + Sync>);

impl HashFn {
    /// Wrap an arbitrary hashing function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> i64 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// CRC-32 of the value's [canonical string](Value::canonical_string).
    pub fn canonical() -> Self {
        Self::new(|value| hashcode::string(&value.canonical_string()))
    }

    /// Identity for integer elements; other values fall back to
    /// [`HashFn::canonical`] hashing.
    pub fn int() -> Self {
        Self::new(|value| match value {
            Value::Int(i) => *i,
            other => hashcode::string(&other.canonical_string()),
        })
    }

    /// Compute the code for `value`.
    pub fn hash(&self, value: &Value) -> i64 {
        (self.0)(value)
    }
}

impl fmt::Debug for HashFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashFn(..)")
    }
}

/// Description of a value's shape.
///
/// List and set elements must be primitive or record schemas, and map values
/// must be primitive; the flat encoding has no way to nest collections
/// directly. Readers reject other shapes when they meet them.
#[derive(Clone, Debug)]
pub enum Schema {
    Bool,
    Int,
    String,
    /// Ordered sequence of the element schema.
    List(Box<Schema>),
    /// String-keyed mapping to the value schema.
    Map(Box<Schema>),
    Set(SetSchema),
    Record(RecordSchema),
}

impl Schema {
    /// List of `elem`.
    pub fn list(elem: Schema) -> Self {
        Self::List(Box::new(elem))
    }

    /// Map with values of `elem`.
    pub fn map(elem: Schema) -> Self {
        Self::Map(Box::new(elem))
    }

    /// Map with string values, the common case.
    pub fn string_map() -> Self {
        Self::map(Self::String)
    }

    /// Set of `elem`, coded by `hash`.
    pub fn set(elem: Schema, hash: HashFn) -> Self {
        Self::Set(SetSchema {
            elem: Box::new(elem),
            hash: Some(hash),
        })
    }

    /// Record with the given fields.
    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self::Record(fields.into_iter().collect())
    }

    /// The kind this schema describes.
    pub fn kind(&self) -> SchemaKind {
        match self {
            Self::Bool => SchemaKind::Bool,
            Self::Int => SchemaKind::Int,
            Self::String => SchemaKind::String,
            Self::List(_) => SchemaKind::List,
            Self::Map(_) => SchemaKind::Map,
            Self::Set(_) => SchemaKind::Set,
            Self::Record(_) => SchemaKind::Record,
        }
    }

    /// The zero value of this schema's kind.
    ///
    /// A record's zero value is an empty record, not a record of zero fields.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::String => Value::String(String::new()),
            Self::List(_) => Value::List(Vec::new()),
            Self::Map(_) => Value::Map(BTreeMap::new()),
            Self::Set(_) => Value::Set(HashedSet::new()),
            Self::Record(_) => Value::Record(BTreeMap::new()),
        }
    }
}

/// Element schema and hashing function of a set.
///
/// `hash` is optional only so that schemas assembled from external
/// definitions can be represented before a function is attached; reading a
/// set without one is a schema error.
#[derive(Clone, Debug)]
pub struct SetSchema {
    pub elem: Box<Schema>,
    pub hash: Option<HashFn>,
}

/// Field schemas of a record, ordered by field name.
#[derive(Clone, Debug, Default)]
pub struct RecordSchema {
    fields: BTreeMap<String, Schema>,
}

impl RecordSchema {
    /// Create a record with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any previous field of the same name.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.insert(name.into(), schema);
        self
    }

    /// Look up a field schema.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.fields.get(name)
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Schema)> for RecordSchema {
    fn from_iter<I: IntoIterator<Item = (K, Schema)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Schema::Bool.kind(), SchemaKind::Bool);
        assert_eq!(Schema::list(Schema::Int).kind(), SchemaKind::List);
        assert_eq!(Schema::string_map().kind(), SchemaKind::Map);
        assert_eq!(Schema::set(Schema::Int, HashFn::int()).kind(), SchemaKind::Set);
        assert_eq!(
            Schema::record([("name", Schema::String)]).kind(),
            SchemaKind::Record
        );
    }

    #[test]
    fn primitive_kinds() {
        assert!(SchemaKind::Bool.is_primitive());
        assert!(SchemaKind::Int.is_primitive());
        assert!(SchemaKind::String.is_primitive());
        assert!(!SchemaKind::List.is_primitive());
        assert!(!SchemaKind::Record.is_primitive());
    }

    #[test]
    fn zero_values() {
        assert_eq!(Schema::Bool.zero_value(), Value::Bool(false));
        assert_eq!(Schema::Int.zero_value(), Value::Int(0));
        assert_eq!(Schema::String.zero_value(), Value::String(String::new()));
        assert_eq!(Schema::list(Schema::Int).zero_value(), Value::List(vec![]));
        assert_eq!(
            Schema::set(Schema::Int, HashFn::int()).zero_value(),
            Value::Set(HashedSet::new())
        );
        assert_eq!(
            Schema::record([("a", Schema::Int)]).zero_value(),
            Value::Record(BTreeMap::new())
        );
    }

    #[test]
    fn record_fields_are_name_ordered() {
        let record = RecordSchema::new()
            .field("value", Schema::String)
            .field("index", Schema::Int);
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["index", "value"]);
        assert_eq!(record.len(), 2);
        assert!(record.get("index").is_some());
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn int_hash_is_identity() {
        let hash = HashFn::int();
        assert_eq!(hash.hash(&Value::Int(50)), 50);
        assert_eq!(
            hash.hash(&Value::String("x".into())),
            hashcode::string("x")
        );
    }

    #[test]
    fn canonical_hash_is_stable_across_clones() {
        let hash = HashFn::canonical();
        let copy = hash.clone();
        let value = Value::String("foo".into());
        assert_eq!(hash.hash(&value), copy.hash(&value));
        assert_eq!(hash.hash(&value), hashcode::string("foo"));
    }

    #[test]
    fn custom_hash() {
        let hash = HashFn::new(|v| v.as_int().map_or(-1, |i| i * 2));
        assert_eq!(hash.hash(&Value::Int(21)), 42);
        assert_eq!(hash.hash(&Value::Bool(true)), -1);
        assert_eq!(format!("{hash:?}"), "HashFn(..)");
    }
}
