//! Evaluation entry points (§6.3): the facade a caller reaches for
//! when all they have is a structured rule and a fact record, in
//! whatever form (native structure, JSON/YAML text, or a file on
//! disk).
//!
//! Each entry point wires the same three steps together: parse the
//! rule and fact into `rule_core::Value`/`rule_ast::FactRecord`,
//! compile the rule through a fresh `rule_builder::RuleBuilder` via
//! `rule_ast::load_node`, then evaluate against a `Context` built from
//! the fact record.

use std::path::Path;

use rule_ast::FactRecord;
use rule_builder::RuleBuilder;
use rule_core::Value;
use rule_error::{RuleError, RuleResult};
use tracing::instrument;

const ORIGIN: &str = "RuleEngine";

fn evaluate(rule: &Value, fact: &FactRecord) -> RuleResult<bool> {
    let builder = RuleBuilder::new();
    let proposition = rule_ast::load_node(rule, &builder, fact)?;
    let ctx = fact.to_context();
    proposition.evaluate(&ctx)
}

/// Evaluates a rule already in native structure form (e.g. built by
/// `serde_json::json!`) against a fact already in the same form,
/// skipping text parsing entirely.
#[instrument(level = "debug", skip_all, fields(origin = ORIGIN))]
pub fn evaluate_from_array(rule: &serde_json::Value, fact: &serde_json::Value) -> RuleResult<bool> {
    let rule = rule_ast::convert::from_json(rule);
    let fact = FactRecord::from_json(fact);
    evaluate(&rule, &fact)
}

/// Evaluates a rule and fact given as JSON text (§6.2).
#[instrument(level = "debug", skip_all, fields(origin = ORIGIN))]
pub fn evaluate_from_json(rule_json: &str, fact_json: &str) -> RuleResult<bool> {
    let rule: serde_json::Value =
        serde_json::from_str(rule_json).map_err(|err| RuleError::structure(ORIGIN, format!("invalid rule JSON: {err}")))?;
    let fact: serde_json::Value =
        serde_json::from_str(fact_json).map_err(|err| RuleError::structure(ORIGIN, format!("invalid fact JSON: {err}")))?;
    evaluate_from_array(&rule, &fact)
}

/// Evaluates a rule and fact given as YAML text.
#[instrument(level = "debug", skip_all, fields(origin = ORIGIN))]
pub fn evaluate_from_yaml(rule_yaml: &str, fact_yaml: &str) -> RuleResult<bool> {
    let rule: serde_yaml::Value =
        serde_yaml::from_str(rule_yaml).map_err(|err| RuleError::structure(ORIGIN, format!("invalid rule YAML: {err}")))?;
    let fact: serde_yaml::Value =
        serde_yaml::from_str(fact_yaml).map_err(|err| RuleError::structure(ORIGIN, format!("invalid fact YAML: {err}")))?;
    let rule = rule_ast::convert::from_yaml(&rule);
    let fact = FactRecord::from_yaml(&fact);
    evaluate(&rule, &fact)
}

/// Reads the rule and fact from JSON files on disk, then evaluates.
#[instrument(level = "debug", skip_all, fields(origin = ORIGIN))]
pub fn evaluate_from_json_file(rule_path: impl AsRef<Path>, fact_path: impl AsRef<Path>) -> RuleResult<bool> {
    let rule_json = read_file(rule_path.as_ref())?;
    let fact_json = read_file(fact_path.as_ref())?;
    evaluate_from_json(&rule_json, &fact_json)
}

/// Reads the rule and fact from YAML files on disk, then evaluates.
#[instrument(level = "debug", skip_all, fields(origin = ORIGIN))]
pub fn evaluate_from_yaml_file(rule_path: impl AsRef<Path>, fact_path: impl AsRef<Path>) -> RuleResult<bool> {
    let rule_yaml = read_file(rule_path.as_ref())?;
    let fact_yaml = read_file(fact_path.as_ref())?;
    evaluate_from_yaml(&rule_yaml, &fact_yaml)
}

fn read_file(path: &Path) -> RuleResult<String> {
    std::fs::read_to_string(path).map_err(|err| RuleError::structure(ORIGIN, format!("failed to read '{}': {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_gate_scenario_from_array() {
        let rule = serde_json::json!({
            "combinator": "and",
            "value": [
                {"operator": "gte", "field": "age", "value": 18},
                {"operator": "eq", "field": "country", "value": "US"},
            ]
        });
        let pass = serde_json::json!({"age": 25, "country": "US"});
        let under_age = serde_json::json!({"age": 17, "country": "US"});
        let wrong_country = serde_json::json!({"age": 25, "country": "CA"});

        assert!(evaluate_from_array(&rule, &pass).unwrap());
        assert!(!evaluate_from_array(&rule, &under_age).unwrap());
        assert!(!evaluate_from_array(&rule, &wrong_country).unwrap());
    }

    #[test]
    fn age_gate_scenario_from_json_text() {
        let rule_json = r#"{
            "combinator": "and",
            "value": [
                {"operator": "gte", "field": "age", "value": 18},
                {"operator": "eq", "field": "country", "value": "US"}
            ]
        }"#;
        let fact_json = r#"{"age": 25, "country": "US"}"#;
        assert!(evaluate_from_json(rule_json, fact_json).unwrap());
    }

    #[test]
    fn age_gate_scenario_from_yaml_text() {
        let rule_yaml = "
combinator: and
value:
  - operator: gte
    field: age
    value: 18
  - operator: eq
    field: country
    value: US
";
        let fact_yaml = "age: 25\ncountry: US\n";
        assert!(evaluate_from_yaml(rule_yaml, fact_yaml).unwrap());
    }

    #[test]
    fn not_composition_scenario() {
        let rule = serde_json::json!({
            "combinator": "not",
            "value": [{"operator": "eq", "field": "status", "value": "banned"}]
        });
        assert!(evaluate_from_array(&rule, &serde_json::json!({"status": "active"})).unwrap());
        assert!(!evaluate_from_array(&rule, &serde_json::json!({"status": "banned"})).unwrap());
    }

    #[test]
    fn xor_exact_one_scenario() {
        let rule = serde_json::json!({
            "combinator": "xor",
            "value": [
                {"operator": "eq", "field": "a", "value": 1},
                {"operator": "eq", "field": "b", "value": 2},
            ]
        });
        assert!(evaluate_from_array(&rule, &serde_json::json!({"a": 1, "b": 0})).unwrap());
        assert!(!evaluate_from_array(&rule, &serde_json::json!({"a": 1, "b": 2})).unwrap());
        assert!(!evaluate_from_array(&rule, &serde_json::json!({"a": 0, "b": 0})).unwrap());
    }

    #[test]
    fn nested_property_scenario() {
        let rule = serde_json::json!({"operator": "gte", "field": "user.profile.age", "value": 18});
        let fact = serde_json::json!({"user": {"profile": {"age": 30}}});
        assert!(evaluate_from_array(&rule, &fact).unwrap());
    }

    #[test]
    fn set_subset_scenario() {
        let rule = serde_json::json!({"operator": "containsSubset", "field": "tags", "value": ["a", "c"]});
        let fact = serde_json::json!({"tags": ["a", "b", "c"]});
        assert!(evaluate_from_array(&rule, &fact).unwrap());

        let miss_rule = serde_json::json!({"operator": "containsSubset", "field": "tags", "value": ["a", "d"]});
        assert!(!evaluate_from_array(&miss_rule, &fact).unwrap());
    }

    /// `modulo`/`stringLength` are value-producing operators, so they
    /// can never stand alone as a rule node — the registry rejects
    /// them with a type error before ever running the division or
    /// string check (§8 scenario 6's domain/type errors for those two
    /// are exercised directly against the operators in `rule-core`).
    /// `in` against a non-collection is a genuine top-level predicate,
    /// so it demonstrates the facade surfacing a type error end-to-end.
    #[test]
    fn non_predicate_operator_as_rule_node_is_type_error() {
        let modulo_rule = serde_json::json!({"operator": "modulo", "field": "ten", "value": 0});
        let err = evaluate_from_array(&modulo_rule, &serde_json::json!({"ten": 10})).unwrap_err();
        assert!(err.is_kind(rule_error::ErrorKind::Type));
    }

    #[test]
    fn in_against_non_collection_is_type_error() {
        let in_rule = serde_json::json!({"operator": "in", "field": "one", "value": 2});
        let err = evaluate_from_array(&in_rule, &serde_json::json!({"one": 1})).unwrap_err();
        assert!(err.is_kind(rule_error::ErrorKind::Type));
    }

    #[test]
    fn malformed_json_is_structure_error() {
        let err = evaluate_from_json("not json", "{}").unwrap_err();
        assert!(err.is_kind(rule_error::ErrorKind::Structure));
    }

    #[test]
    fn file_variants_read_and_evaluate() {
        let dir = std::env::temp_dir().join(format!("rule-engine-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let rule_path = dir.join("rule.json");
        let fact_path = dir.join("fact.json");
        std::fs::write(&rule_path, r#"{"operator": "eq", "field": "ok", "value": true}"#).unwrap();
        std::fs::write(&fact_path, r#"{"ok": true}"#).unwrap();

        assert!(evaluate_from_json_file(&rule_path, &fact_path).unwrap());

        std::fs::remove_dir_all(&dir).ok();
    }

    use proptest::prelude::*;

    proptest! {
        /// `gte(age, threshold)` agrees with plain integer comparison for
        /// any age/threshold pair, exercised end-to-end through the facade
        /// rather than against the operator alone.
        #[test]
        fn gte_rule_matches_integer_comparison(age: i64, threshold: i64) {
            let rule = serde_json::json!({"operator": "gte", "field": "age", "value": threshold});
            let fact = serde_json::json!({"age": age});
            prop_assert_eq!(evaluate_from_array(&rule, &fact).unwrap(), age >= threshold);
        }

        /// The same rule and fact evaluate identically whether routed through
        /// the JSON or the YAML text entry point (§6.2's two surfaces for one
        /// structured format).
        #[test]
        fn json_and_yaml_entry_points_agree(age: i64, threshold: i64) {
            let rule_json = format!(r#"{{"operator": "gte", "field": "age", "value": {threshold}}}"#);
            let fact_json = format!(r#"{{"age": {age}}}"#);
            let rule_yaml = format!("operator: gte\nfield: age\nvalue: {threshold}\n");
            let fact_yaml = format!("age: {age}\n");

            let via_json = evaluate_from_json(&rule_json, &fact_json).unwrap();
            let via_yaml = evaluate_from_yaml(&rule_yaml, &fact_yaml).unwrap();
            prop_assert_eq!(via_json, via_yaml);
        }
    }
}
