//! Structured AST loader (§4.7): turns a generic
//! `{combinator|operator, field, value}` tree into an operator tree
//! built on `rule-core`/`rule-builder`.

use rule_builder::{logical_and, logical_not, logical_or, logical_xor, IntoOperand, RuleBuilder};
use rule_core::{OperandHandle, PropositionHandle, Value, Variable};
use rule_error::{RuleError, RuleResult};
use tracing::instrument;

use crate::fact::FactRecord;

const ORIGIN: &str = "StructuredAstLoader";

/// Parses and builds a proposition tree from an already-converted
/// `rule_core::Value` node (itself produced from JSON or YAML text by
/// `convert.rs`), resolving `field`/`value` references against `fact`.
#[instrument(level = "trace", skip(builder, fact), fields(origin = ORIGIN))]
pub fn load_node(node: &Value, builder: &RuleBuilder, fact: &FactRecord) -> RuleResult<PropositionHandle> {
    let Value::Map(entries) = node else {
        return Err(RuleError::structure(ORIGIN, "rule node must be a mapping"));
    };

    if let Some(combinator) = entries.get("combinator") {
        return load_combinator(combinator, entries.get("value"), builder, fact);
    }

    if let Some(operator) = entries.get("operator") {
        return load_operator(operator, entries, builder, fact);
    }

    Err(RuleError::structure(
        ORIGIN,
        "node has neither a 'combinator' nor an 'operator' key",
    ))
}

fn load_combinator(
    combinator: &Value,
    children: Option<&Value>,
    builder: &RuleBuilder,
    fact: &FactRecord,
) -> RuleResult<PropositionHandle> {
    let Value::Text(combinator) = combinator else {
        return Err(RuleError::structure(ORIGIN, "'combinator' must be a string"));
    };

    let Some(Value::Array(children)) = children else {
        return Err(RuleError::structure(ORIGIN, "combinator node is missing its 'value' array"));
    };

    let built: RuleResult<Vec<PropositionHandle>> = children.iter().map(|child| load_node(child, builder, fact)).collect();
    let built = built?;

    match combinator.as_str() {
        "not" => {
            if built.len() != 1 {
                return Err(RuleError::structure(
                    ORIGIN,
                    format!("'not' requires exactly 1 child, got {}", built.len()),
                ));
            }
            Ok(logical_not(built.into_iter().next().expect("length checked above")))
        }
        "and" => {
            require_at_least_one(&built, "and")?;
            Ok(logical_and(built))
        }
        "or" => {
            require_at_least_one(&built, "or")?;
            Ok(logical_or(built))
        }
        "xor" => {
            require_at_least_one(&built, "xor")?;
            Ok(logical_xor(built))
        }
        other => Err(RuleError::configuration(ORIGIN, format!("unknown combinator '{other}'"))),
    }
}

fn require_at_least_one(children: &[PropositionHandle], combinator: &str) -> RuleResult<()> {
    if children.is_empty() {
        return Err(RuleError::structure(
            ORIGIN,
            format!("'{combinator}' requires at least 1 child, got 0"),
        ));
    }
    Ok(())
}

fn load_operator(
    operator: &Value,
    entries: &indexmap::IndexMap<String, Value>,
    builder: &RuleBuilder,
    fact: &FactRecord,
) -> RuleResult<PropositionHandle> {
    let Value::Text(operator) = operator else {
        return Err(RuleError::structure(ORIGIN, "'operator' must be a string"));
    };

    let Some(Value::Text(field)) = entries.get("field") else {
        return Err(RuleError::structure(ORIGIN, "operator node is missing a string 'field'"));
    };

    let field_operand = resolve_field(field, builder);

    let mut operands = vec![field_operand];
    if let Some(value) = entries.get("value") {
        operands.push(resolve_value(value, builder, fact));
    }

    builder.registry().build_proposition(operator, operands)
}

/// Dotted-string field resolution via the builder's variable cache
/// (§4.7: "Resolves `field` to a variable or dotted property chain").
fn resolve_field(field: &str, builder: &RuleBuilder) -> OperandHandle {
    let mut segments = field.split('.');
    let root = segments.next().expect("split always yields at least one segment");
    let variable: std::sync::Arc<Variable> = builder.field(root);

    let Some(first_property) = segments.next() else {
        return variable;
    };
    let mut property = variable.property(first_property);
    for segment in segments {
        property = property.property(segment);
    }
    property
}

/// Three-way value resolution (§4.7):
/// 1. a dotted string ⇒ compile-time literal substitution from the fact record;
/// 2. a plain string matching a top-level fact key ⇒ late-bound variable reference;
/// 3. anything else ⇒ a literal.
fn resolve_value(value: &Value, builder: &RuleBuilder, fact: &FactRecord) -> OperandHandle {
    if let Value::Text(text) = value {
        if text.contains('.') {
            if let Some(resolved) = fact.get_dotted(text) {
                return resolved.into_operand();
            }
        } else if fact.contains_key(text) {
            return builder.field(text.clone()).into_operand();
        }
    }
    value.clone().into_operand()
}
