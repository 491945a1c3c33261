//! `FactRecord`: the mapping a structured rule is evaluated against
//! (§6.3 "the fact input is a mapping; nested mappings support dotted
//! paths in fields").

use indexmap::IndexMap;
use rule_core::{Context, Value};

/// A parsed fact record, keyed at the top level by field name. Nested
/// fields are `Value::Map` entries, navigated by splitting a dotted
/// path on `.`.
#[derive(Debug, Clone, Default)]
pub struct FactRecord {
    fields: IndexMap<String, Value>,
}

impl FactRecord {
    #[must_use]
    pub fn new(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match crate::convert::from_json(value) {
            Value::Map(fields) => Self::new(fields),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn from_yaml(value: &serde_yaml::Value) -> Self {
        match crate::convert::from_yaml(value) {
            Value::Map(fields) => Self::new(fields),
            _ => Self::default(),
        }
    }

    /// Whether `name` is a top-level key of this record (§4.7: used to
    /// decide whether a bare string `value` is a late-bound variable
    /// reference).
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Deep lookup along a dotted path (`"user.profile.age"`), used for
    /// §4.7's compile-time literal substitution. Each segment after the
    /// first must resolve through a `Value::Map`.
    #[must_use]
    pub fn get_dotted(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.fields.get(first)?.clone();
        for segment in segments {
            let Value::Map(entries) = &current else {
                return None;
            };
            current = entries.get(segment)?.clone();
        }
        Some(current)
    }

    /// Populates a fresh `Context` with this record's top-level fields.
    #[must_use]
    pub fn to_context(&self) -> Context {
        let ctx = Context::new();
        for (name, value) in &self.fields {
            ctx.set(name.clone(), value.clone()).expect("a fresh Context has no frozen entries");
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_lookup_descends_nested_maps() {
        let json = serde_json::json!({"user": {"profile": {"age": 30}}});
        let fact = FactRecord::from_json(&json);
        assert_eq!(fact.get_dotted("user.profile.age"), Some(Value::Int(30)));
    }

    #[test]
    fn dotted_lookup_fails_past_a_scalar() {
        let json = serde_json::json!({"age": 30});
        let fact = FactRecord::from_json(&json);
        assert_eq!(fact.get_dotted("age.nonsense"), None);
    }

    #[test]
    fn to_context_binds_top_level_fields() {
        let json = serde_json::json!({"age": 25, "country": "US"});
        let fact = FactRecord::from_json(&json);
        let ctx = fact.to_context();
        assert_eq!(ctx.get("age").unwrap(), Value::Int(25));
        assert_eq!(ctx.get("country").unwrap(), Value::Text("US".to_string()));
    }

    #[test]
    fn contains_key_checks_top_level_only() {
        let json = serde_json::json!({"user": {"age": 30}});
        let fact = FactRecord::from_json(&json);
        assert!(fact.contains_key("user"));
        assert!(!fact.contains_key("age"));
    }

    use proptest::prelude::*;

    proptest! {
        /// Every top-level integer field a record was built from round-trips
        /// unchanged through `to_context`, for arbitrary field names and values,
        /// not just the one literal example above.
        #[test]
        fn to_context_preserves_any_top_level_integer_field(name in "[a-z]{1,12}", value: i64) {
            let json = serde_json::json!({ name.clone(): value });
            let fact = FactRecord::from_json(&json);
            let ctx = fact.to_context();
            prop_assert_eq!(ctx.get(&name).unwrap(), Value::Int(value));
            prop_assert_eq!(fact.get_dotted(&name), Some(Value::Int(value)));
        }
    }
}
