//! `serde_json::Value` / `serde_yaml::Value` → `rule_core::Value`
//! conversion (§6.2, §6.3). Both textual formats funnel through this
//! one recursive mapping so the loader only ever walks `rule_core::Value`
//! trees, never format-specific ASTs.

use indexmap::IndexMap;
use rule_core::Value;

pub fn from_json(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::Text(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(from_json).collect()),
        serde_json::Value::Object(entries) => {
            let mut map = IndexMap::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(key.clone(), from_json(value));
            }
            Value::Map(map)
        }
    }
}

pub fn from_yaml(value: &serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_yaml::Value::String(s) => Value::Text(s.clone()),
        serde_yaml::Value::Sequence(items) => Value::Array(items.iter().map(from_yaml).collect()),
        serde_yaml::Value::Mapping(entries) => {
            let mut map = IndexMap::with_capacity(entries.len());
            for (key, value) in entries {
                if let Some(key) = key.as_str() {
                    map.insert(key.to_string(), from_yaml(value));
                }
            }
            Value::Map(map)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_becomes_map() {
        let json = serde_json::json!({"age": 30, "name": "a"});
        let value = from_json(&json);
        let Value::Map(map) = value else { panic!("expected map") };
        assert_eq!(map.get("age"), Some(&Value::Int(30)));
        assert_eq!(map.get("name"), Some(&Value::Text("a".to_string())));
    }

    #[test]
    fn json_float_stays_float() {
        let json = serde_json::json!(3.5);
        assert_eq!(from_json(&json), Value::Float(3.5));
    }

    #[test]
    fn yaml_sequence_becomes_array() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("- 1\n- 2\n- 3\n").unwrap();
        let value = from_yaml(&yaml);
        assert_eq!(value, Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
    }

    #[test]
    fn yaml_mapping_becomes_map() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("age: 30\ncountry: US\n").unwrap();
        let value = from_yaml(&yaml);
        let Value::Map(map) = value else { panic!("expected map") };
        assert_eq!(map.get("country"), Some(&Value::Text("US".to_string())));
    }
}
