//! [`FieldReader`] backed by a flat [`InstanceDiff`].

use std::collections::BTreeMap;

use planfield_diff::{AttrDiff, InstanceDiff};
use planfield_types::{
    hashcode, Address, HashedSet, RecordSchema, Schema, SchemaKind, SetSchema, Value,
};
use tracing::{debug, trace, warn};

use crate::config::ReaderConfig;
use crate::error::{ReaderError, ReaderResult};
use crate::result::FieldReadResult;
use crate::traits::FieldReader;

/// Path segment holding the element count of a list or set.
pub const COUNT_KEY: &str = "#";

/// Path segment some writers use for the entry count of a map.
pub const MAP_COUNT_KEY: &str = "%";

/// Reads the new side of a resource diff.
///
/// The reader walks the schema recursively over an [`Address`] and only joins
/// it into a dotted key when it looks something up in the diff.
///
/// When an entry is flagged both removed and not-yet-known, removal wins: the
/// value reads as present, known, and cleared to its zero value.
#[derive(Clone, Debug)]
pub struct DiffFieldReader {
    diff: InstanceDiff,
    config: ReaderConfig,
}

impl DiffFieldReader {
    /// Create a reader over `diff` with the default configuration.
    pub fn new(diff: InstanceDiff) -> Self {
        Self::with_config(diff, ReaderConfig::default())
    }

    /// Create a reader over `diff` with an explicit configuration.
    pub fn with_config(diff: InstanceDiff, config: ReaderConfig) -> Self {
        Self { diff, config }
    }

    /// Create a reader over a diff loaded from its JSON document form.
    pub fn from_json(json: &str) -> ReaderResult<Self> {
        Ok(Self::new(InstanceDiff::from_json(json)?))
    }

    /// The diff this reader interprets.
    pub fn diff(&self) -> &InstanceDiff {
        &self.diff
    }

    /// The configuration this reader applies.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    fn read_at(&self, address: &Address, schema: &Schema) -> ReaderResult<FieldReadResult> {
        if address.len() > self.config.max_depth {
            return Err(ReaderError::DepthExceeded {
                address: address.clone(),
                max_depth: self.config.max_depth,
            });
        }

        match schema {
            Schema::Bool | Schema::Int | Schema::String => self.read_primitive(address, schema),
            Schema::List(elem) => self.read_list(address, elem),
            Schema::Map(elem) => self.read_map(address, elem),
            Schema::Set(set) => self.read_set(address, set),
            Schema::Record(record) => self.read_record(address, record),
        }
    }

    fn read_primitive(&self, address: &Address, schema: &Schema) -> ReaderResult<FieldReadResult> {
        let Some(attr) = self.diff.get(&address.join()) else {
            return Ok(FieldReadResult::absent());
        };

        if attr.new_removed {
            return Ok(FieldReadResult::present(schema.zero_value()));
        }
        if attr.new_computed {
            return Ok(FieldReadResult::computed(schema.zero_value()));
        }

        let value = decode_primitive(address, schema, &attr.new)?;
        Ok(FieldReadResult::present(value))
    }

    fn read_list(&self, address: &Address, elem: &Schema) -> ReaderResult<FieldReadResult> {
        check_element(address, elem, SchemaKind::List)?;

        let count = match self.read_count(address, || Value::List(Vec::new()))? {
            Count::Known(count) => count,
            Count::Settled(result) => return Ok(result),
        };

        // Length is bounded by the entries under `<address>.`, never by the
        // stored count alone.
        let prefix = format!("{}.", address.join());
        let mut entries = 0;
        let mut highest = None;
        for (key, _) in self.diff.prefixed(&prefix) {
            entries += 1;
            let rest = &key[prefix.len()..];
            let segment = rest.split_once('.').map_or(rest, |(index, _)| index);
            if let Ok(index) = segment.parse::<usize>() {
                if index < count {
                    highest = highest.max(Some(index));
                }
            }
        }
        let len = highest.map_or(0, |index| index + 1).min(entries);

        let mut items = Vec::with_capacity(len);
        let mut found = 0;
        for index in 0..len {
            let item = self.read_at(&address.child(index.to_string()), elem)?;
            if item.exists {
                found += 1;
            }
            items.push(item.value.unwrap_or_else(|| elem.zero_value()));
        }
        if found != count {
            self.count_mismatch(address, count, found)?;
        }

        Ok(FieldReadResult::present(Value::List(items)))
    }

    fn read_map(&self, address: &Address, elem: &Schema) -> ReaderResult<FieldReadResult> {
        if !elem.kind().is_primitive() {
            return Err(ReaderError::SchemaShape {
                address: address.clone(),
                reason: format!("map values must be primitive, got {}", elem.kind()),
            });
        }

        let prefix = format!("{}.", address.join());
        let mut values = BTreeMap::new();
        let mut removed = BTreeMap::new();
        let mut exists = false;
        let mut computed = false;

        for (key, attr) in self.diff.prefixed(&prefix) {
            let map_key = &key[prefix.len()..];
            if map_key == COUNT_KEY || map_key == MAP_COUNT_KEY {
                computed |= attr.new_computed;
                continue;
            }

            exists = true;
            if attr.new_removed {
                removed.insert(map_key.to_string(), Value::String(String::new()));
            } else if attr.new_computed {
                computed = true;
                values.insert(map_key.to_string(), elem.zero_value());
            } else {
                let value = decode_primitive(&address.child(map_key), elem, &attr.new)?;
                values.insert(map_key.to_string(), value);
            }
        }

        if !exists && !computed {
            return Ok(FieldReadResult::absent());
        }

        Ok(FieldReadResult {
            value: Some(Value::Map(values)),
            neg_value: Some(removed),
            exists: true,
            computed,
        })
    }

    fn read_set(&self, address: &Address, set: &SetSchema) -> ReaderResult<FieldReadResult> {
        let hash = set.hash.as_ref().ok_or_else(|| ReaderError::SchemaShape {
            address: address.clone(),
            reason: "set schema has no hash function".into(),
        })?;
        check_element(address, &set.elem, SchemaKind::Set)?;

        let count = match self.read_count(address, || Value::Set(HashedSet::new()))? {
            Count::Known(count) => count,
            Count::Settled(result) => return Ok(result),
        };

        // Group entries by member code. A member is departing when every one
        // of its entries is flagged removed.
        let prefix = format!("{}.", address.join());
        let mut members: BTreeMap<&str, bool> = BTreeMap::new();
        for (key, attr) in self.diff.prefixed(&prefix) {
            let rest = &key[prefix.len()..];
            let code = rest.split_once('.').map_or(rest, |(code, _)| code);
            if code == COUNT_KEY {
                continue;
            }
            let departing = members.entry(code).or_insert(true);
            *departing &= attr.new_removed;
        }

        let mut result = HashedSet::new();
        for (segment, departing) in members {
            let code = hashcode::parse_code(segment).map_err(|_| ReaderError::SetCode {
                address: address.clone(),
                segment: segment.to_string(),
            })?;
            if departing {
                trace!(address = %address, code, "skipping departing set member");
                continue;
            }

            let member_address = address.child(segment);
            let member = self.read_at(&member_address, &set.elem)?;
            let value = member.value.unwrap_or_else(|| set.elem.zero_value());

            if self.config.verify_set_codes {
                let computed = hash.hash(&value);
                if computed != code {
                    return Err(ReaderError::SetCodeMismatch {
                        address: member_address,
                        stored: code,
                        computed,
                    });
                }
            }

            trace!(address = %address, code, "decoded set member");
            result.insert(code, value);
        }

        if result.len() != count {
            self.count_mismatch(address, count, result.len())?;
        }

        Ok(FieldReadResult::present(Value::Set(result)))
    }

    fn read_record(
        &self,
        address: &Address,
        record: &RecordSchema,
    ) -> ReaderResult<FieldReadResult> {
        let mut fields = BTreeMap::new();
        let mut exists = false;
        let mut computed = false;

        for (name, schema) in record.iter() {
            let field = self.read_at(&address.child(name), schema)?;
            if !field.exists {
                continue;
            }
            exists = true;
            computed |= field.computed;
            if let Some(value) = field.value {
                fields.insert(name.to_string(), value);
            }
        }

        if !exists {
            return Ok(FieldReadResult::absent());
        }

        Ok(FieldReadResult {
            value: Some(Value::Record(fields)),
            neg_value: None,
            exists: true,
            computed,
        })
    }

    /// Resolve the `#` count of the list or set at `address`.
    ///
    /// Absent, removed and not-yet-known counts settle the read without
    /// looking at any elements; `empty` builds the collection's empty value.
    fn read_count(&self, address: &Address, empty: impl Fn() -> Value) -> ReaderResult<Count> {
        let count_address = address.child(COUNT_KEY);
        let Some(attr) = self.diff.get(&count_address.join()) else {
            return Ok(Count::Settled(FieldReadResult::absent()));
        };

        if attr.new_removed {
            return Ok(Count::Settled(FieldReadResult::present(empty())));
        }
        if attr.new_computed {
            return Ok(Count::Settled(FieldReadResult::computed(empty())));
        }

        decode_count(&count_address, attr).map(Count::Known)
    }

    fn count_mismatch(&self, address: &Address, expected: usize, found: usize) -> ReaderResult<()> {
        if self.config.strict_counts {
            return Err(ReaderError::CountMismatch {
                address: address.clone(),
                expected,
                found,
            });
        }
        warn!(address = %address, expected, found, "stored count disagrees with elements present");
        Ok(())
    }
}

impl FieldReader for DiffFieldReader {
    fn read(&self, address: &Address, schema: &Schema) -> ReaderResult<FieldReadResult> {
        if address.is_empty() {
            return Err(ReaderError::EmptyAddress);
        }
        debug!(address = %address, kind = %schema.kind(), "reading field from diff");
        self.read_at(address, schema)
    }
}

enum Count {
    Known(usize),
    Settled(FieldReadResult),
}

fn decode_count(address: &Address, attr: &AttrDiff) -> ReaderResult<usize> {
    if attr.new.is_empty() {
        return Ok(0);
    }
    attr.new.parse::<usize>().map_err(|_| ReaderError::Decode {
        address: address.clone(),
        kind: SchemaKind::Int,
        raw: attr.new.clone(),
    })
}

/// Decode the flat string encoding of a primitive. An empty string decodes to
/// the kind's zero value.
fn decode_primitive(address: &Address, schema: &Schema, raw: &str) -> ReaderResult<Value> {
    let decode_error = || ReaderError::Decode {
        address: address.clone(),
        kind: schema.kind(),
        raw: raw.to_string(),
    };

    match schema {
        Schema::String => Ok(Value::String(raw.to_string())),
        Schema::Bool | Schema::Int if raw.is_empty() => Ok(schema.zero_value()),
        Schema::Bool => raw.parse::<bool>().map(Value::Bool).map_err(|_| decode_error()),
        Schema::Int => raw.parse::<i64>().map(Value::Int).map_err(|_| decode_error()),
        Schema::List(_) | Schema::Map(_) | Schema::Set(_) | Schema::Record(_) => {
            Err(ReaderError::SchemaShape {
                address: address.clone(),
                reason: format!("expected a primitive schema, got {}", schema.kind()),
            })
        }
    }
}

/// List and set elements must be primitives or records.
fn check_element(address: &Address, elem: &Schema, container: SchemaKind) -> ReaderResult<()> {
    if elem.kind().is_primitive() || elem.kind() == SchemaKind::Record {
        return Ok(());
    }
    Err(ReaderError::SchemaShape {
        address: address.clone(),
        reason: format!(
            "{container} elements must be primitive or record, got {}",
            elem.kind()
        ),
    })
}
