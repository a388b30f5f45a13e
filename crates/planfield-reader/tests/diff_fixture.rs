//! Representative diff fixture read through the `FieldReader` contract.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

use planfield_diff::InstanceDiff;
use planfield_reader::{DiffFieldReader, FieldReadResult, FieldReader, ReaderConfig};
use planfield_types::{hashcode, Address, HashFn, Schema, Value};
use serde_json::json;

fn fixture() -> InstanceDiff {
    let doc = json!({
        "attributes": {
            "bool": {"old": "", "new": "true"},
            "int": {"old": "", "new": "42"},
            "string": {"old": "", "new": "string"},

            "list.#": {"old": "0", "new": "2"},
            "list.0": {"old": "", "new": "foo"},
            "list.1": {"old": "", "new": "bar"},

            "listInt.#": {"old": "0", "new": "2"},
            "listInt.0": {"old": "", "new": "21"},
            "listInt.1": {"old": "", "new": "42"},

            "map.foo": {"old": "", "new": "bar"},
            "map.bar": {"old": "", "new": "baz"},

            "mapRemove.foo": {"old": "", "new": "bar"},
            "mapRemove.bar": {"new_removed": true},

            "set.#": {"old": "0", "new": "2"},
            "set.10": {"old": "", "new": "10"},
            "set.50": {"old": "", "new": "50"},

            "setDeep.#": {"old": "0", "new": "2"},
            "setDeep.10.index": {"old": "", "new": "10"},
            "setDeep.10.value": {"old": "", "new": "foo"},
            "setDeep.50.index": {"old": "", "new": "50"},
            "setDeep.50.value": {"old": "", "new": "bar"}
        }
    });
    InstanceDiff::from_json(&doc.to_string()).unwrap()
}

fn deep_schema() -> Schema {
    Schema::set(
        Schema::record([("index", Schema::Int), ("value", Schema::String)]),
        HashFn::new(|v| {
            v.as_record()
                .and_then(|fields| fields.get("index"))
                .and_then(Value::as_int)
                .unwrap_or(0)
        }),
    )
}

fn strings(items: &[&str]) -> Value {
    Value::List(items.iter().map(|s| Value::from(*s)).collect())
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::from(*v)))
        .collect()
}

fn record(pairs: &[(&str, Value)]) -> Value {
    Value::Record(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    )
}

/// Flatten set values so they compare as ordered lists.
fn flatten(mut result: FieldReadResult) -> FieldReadResult {
    if let Some(Value::Set(set)) = &result.value {
        result.value = Some(Value::List(set.to_vec()));
    }
    result
}

#[test]
fn reads_every_fixture_address() {
    let reader = DiffFieldReader::new(fixture());

    let cases: Vec<(&str, Vec<&str>, Schema, FieldReadResult)> = vec![
        ("noexist", vec!["boolNOPE"], Schema::Bool, FieldReadResult::absent()),
        (
            "bool",
            vec!["bool"],
            Schema::Bool,
            FieldReadResult::present(Value::Bool(true)),
        ),
        (
            "int",
            vec!["int"],
            Schema::Int,
            FieldReadResult::present(Value::Int(42)),
        ),
        (
            "string",
            vec!["string"],
            Schema::String,
            FieldReadResult::present(Value::from("string")),
        ),
        (
            "list",
            vec!["list"],
            Schema::list(Schema::String),
            FieldReadResult::present(strings(&["foo", "bar"])),
        ),
        (
            "listInt",
            vec!["listInt"],
            Schema::list(Schema::Int),
            FieldReadResult::present(Value::List(vec![Value::Int(21), Value::Int(42)])),
        ),
        (
            "map",
            vec!["map"],
            Schema::string_map(),
            FieldReadResult {
                value: Some(Value::Map(string_map(&[("foo", "bar"), ("bar", "baz")]))),
                neg_value: Some(BTreeMap::new()),
                exists: true,
                computed: false,
            },
        ),
        (
            "mapelem",
            vec!["map", "foo"],
            Schema::String,
            FieldReadResult::present(Value::from("bar")),
        ),
        (
            "mapRemove",
            vec!["mapRemove"],
            Schema::string_map(),
            FieldReadResult {
                value: Some(Value::Map(string_map(&[("foo", "bar")]))),
                neg_value: Some(string_map(&[("bar", "")])),
                exists: true,
                computed: false,
            },
        ),
        (
            "set",
            vec!["set"],
            Schema::set(Schema::Int, HashFn::int()),
            FieldReadResult::present(Value::List(vec![Value::Int(10), Value::Int(50)])),
        ),
        (
            "setDeep",
            vec!["setDeep"],
            deep_schema(),
            FieldReadResult::present(Value::List(vec![
                record(&[("index", Value::Int(10)), ("value", Value::from("foo"))]),
                record(&[("index", Value::Int(50)), ("value", Value::from("bar"))]),
            ])),
        ),
    ];

    for (name, path, schema, expected) in cases {
        let out = reader
            .read(&Address::new(path), &schema)
            .unwrap_or_else(|e| panic!("{name}: err: {e}"));
        assert_eq!(flatten(out), expected, "{name}");
    }
}

#[test]
fn map_positive_and_negative_keys_are_disjoint() {
    let reader = DiffFieldReader::new(fixture());
    let out = reader
        .read(&Address::new(["mapRemove"]), &Schema::string_map())
        .unwrap();
    let positive = out.value.unwrap();
    let negative = out.neg_value.unwrap();
    for key in negative.keys() {
        assert!(!positive.as_map().unwrap().contains_key(key));
    }
}

#[test]
fn set_record_codes_match_schema_hash() {
    let reader = DiffFieldReader::with_config(fixture(), ReaderConfig::strict());
    let schema = deep_schema();
    let out = reader.read(&Address::new(["setDeep"]), &schema).unwrap();

    let Schema::Set(set_schema) = &schema else {
        unreachable!("deep_schema is a set");
    };
    let hash = set_schema.hash.as_ref().unwrap();
    let set = out.value.unwrap();
    for (code, member) in set.as_set().unwrap().iter() {
        assert_eq!(hash.hash(member), code);
    }
}

#[test]
fn set_members_readable_individually() {
    let reader = DiffFieldReader::new(fixture());
    let out = reader
        .read_path("setDeep.50.value", &Schema::String)
        .unwrap();
    assert_eq!(out.value, Some(Value::from("bar")));
}

#[test]
fn set_json_is_ascending_by_code() {
    let reader = DiffFieldReader::new(fixture());
    let out = reader.read_path("setDeep", &deep_schema()).unwrap();
    assert_eq!(
        out.value.unwrap().to_json(),
        json!([
            {"index": 10, "value": "foo"},
            {"index": 50, "value": "bar"},
        ])
    );
}

#[test]
fn callers_depend_only_on_the_contract() {
    let reader: Box<dyn FieldReader> = Box::new(DiffFieldReader::new(fixture()));
    let out = reader.read_path("int", &Schema::Int).unwrap();
    assert_eq!(out.value, Some(Value::Int(42)));
}

#[test]
fn concurrent_reads_agree() {
    let reader = Arc::new(DiffFieldReader::new(fixture()));
    let schema = Arc::new(deep_schema());
    let expected = reader.read_path("setDeep", &schema).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let reader = Arc::clone(&reader);
            let schema = Arc::clone(&schema);
            thread::spawn(move || reader.read_path("setDeep", &schema).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn canonical_hash_codes_from_writer() {
    let mut diff = InstanceDiff::new();
    diff.insert("zones.#", planfield_diff::AttrDiff::added("2"));
    for zone in ["us-east-1a", "us-east-1b"] {
        diff.insert(
            format!("zones.{}", hashcode::string(zone)),
            planfield_diff::AttrDiff::added(zone),
        );
    }
    let reader = DiffFieldReader::with_config(diff, ReaderConfig::strict());
    let out = reader
        .read_path("zones", &Schema::set(Schema::String, HashFn::canonical()))
        .unwrap();
    let set = out.value.unwrap();
    let set = set.as_set().unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.contains(hashcode::string("us-east-1a")));
}
