use std::collections::BTreeMap;

use planfield_types::{Schema, Value};

/// The outcome of reading one address.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldReadResult {
    /// The decoded value, or `None` when nothing is stored at the address.
    pub value: Option<Value>,
    /// Keys being removed from a map, each with an empty placeholder.
    /// Only map reads set this.
    pub neg_value: Option<BTreeMap<String, Value>>,
    /// A value is present at the address.
    pub exists: bool,
    /// The value will not be known until the change is applied.
    pub computed: bool,
}

impl FieldReadResult {
    /// Nothing stored at the address.
    pub fn absent() -> Self {
        Self::default()
    }

    /// A known, present value.
    pub fn present(value: Value) -> Self {
        Self {
            value: Some(value),
            exists: true,
            ..Default::default()
        }
    }

    /// A present value that is not yet known, carried as `zero`.
    pub fn computed(zero: Value) -> Self {
        Self {
            value: Some(zero),
            exists: true,
            computed: true,
            ..Default::default()
        }
    }

    /// The value, or the zero value of `schema` if absent.
    pub fn value_or_zero(&self, schema: &Schema) -> Value {
        self.value.clone().unwrap_or_else(|| schema.zero_value())
    }

    /// Consume the result, yielding its value.
    pub fn into_value(self) -> Option<Value> {
        self.value
    }
}
