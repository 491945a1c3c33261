//! Custom-operator namespace registry (§4.6 "custom-operator namespace
//! registry") and the standard library namespace covering §6.4's
//! stable symbol table.
//!
//! Unlike the fluent methods in `fluent.rs`, which have compile-time
//! arity and can never raise a *cardinality violation*, this path
//! takes a runtime-counted `Vec<OperandHandle>` — it exists for
//! consumers that only learn an operator's name and operand count at
//! runtime, chiefly the structured AST loader (`rule-ast`).

use std::fmt;
use std::sync::Arc;

use rule_core::capability::{OperandHandle, PropositionHandle};
use rule_core::operator::comparison::{
    Between, EqualTo, GreaterThan, GreaterThanOrEqualTo, In, LessThan, LessThanOrEqualTo, NotEqualTo, NotIn, NotSameAs,
    SameAs,
};
use rule_core::operator::date::{After, Before, IsBetweenDates};
use rule_core::operator::math::{Abs, Addition, Ceil, Division, Exponentiate, Floor, Max, Min, Modulo, Multiplication, Negation, Round, Subtraction};
use rule_core::operator::set_ops::{Complement, ContainsSubset, DoesNotContainSubset, Intersect, SetContains, SetDoesNotContain, SymmetricDifference, Union};
use rule_core::operator::string_ops::{
    DoesNotMatch, EndsWith, EndsWithInsensitive, Matches, StartsWith, StartsWithInsensitive, StringContains,
    StringContainsInsensitive, StringDoesNotContain, StringDoesNotContainInsensitive, StringLength,
};
use rule_core::operator::type_ops::{ArrayCount, IsArray, IsBoolean, IsEmpty, IsNull, IsNumeric, IsString};
use rule_core::operator::{require_binary, require_range, require_unary};
use rule_error::{RuleError, RuleResult};

/// What a namespace built from a symbol and its operands: either a
/// boolean-producing `Proposition` or a value-producing `Operand`.
#[derive(Clone)]
pub enum BuiltOperator {
    Proposition(PropositionHandle),
    Operand(OperandHandle),
}

impl BuiltOperator {
    /// Unwraps a `Proposition`, or a type error if this symbol built a
    /// value-producing operator instead — the shape a rule condition
    /// needs (§4.7: operator nodes are always predicates).
    pub fn into_proposition(self, origin: &str) -> RuleResult<PropositionHandle> {
        match self {
            Self::Proposition(p) => Ok(p),
            Self::Operand(_) => Err(RuleError::type_error(
                origin,
                "operator produces a value, not a boolean predicate",
            )),
        }
    }
}

/// A source of operator constructors, searched by symbolic name.
/// Custom implementors register additional operators beyond §6.4's
/// standard library; [`OperatorRegistry`] always carries
/// [`StandardOperators`] and lets callers append more.
pub trait OperatorNamespace: fmt::Debug + Send + Sync {
    /// Attempt to build the operator named `symbol` from `operands`.
    /// Returns `None` when this namespace doesn't recognize `symbol`
    /// at all — the registry then tries the next namespace. Returns
    /// `Some(Err(..))` when the symbol is recognized but the operand
    /// count or shape is wrong.
    fn build(&self, symbol: &str, operands: Vec<OperandHandle>) -> Option<RuleResult<BuiltOperator>>;
}

/// Normalizes a symbol the way the source language's dynamic
/// namespace lookup did: first letter upper-cased, rest untouched
/// (§4.6). Exposed for third-party [`OperatorNamespace`] implementors
/// that want the same convention for their own class-name lookup.
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// §6.4's stable operator symbol table: Comparison, Mathematical,
/// String, Set, Type, and Date groups. (Logical connectives are
/// handled separately by the builder's `logical_and/or/not/xor`
/// factory helpers and the AST loader's `combinator` nodes — they
/// compose `Proposition`s, not `Operand`s, so they don't fit this
/// namespace's `Vec<OperandHandle>` shape.)
#[derive(Debug, Default)]
pub struct StandardOperators;

macro_rules! binary_proposition {
    ($operands:expr, $origin:expr, $ty:ident) => {{
        let (lhs, rhs) = require_binary($operands, $origin)?;
        Ok(BuiltOperator::Proposition(Arc::new($ty::new(lhs, rhs))))
    }};
}

macro_rules! binary_operand {
    ($operands:expr, $origin:expr, $ty:ident) => {{
        let (lhs, rhs) = require_binary($operands, $origin)?;
        Ok(BuiltOperator::Operand(Arc::new($ty::new(lhs, rhs))))
    }};
}

macro_rules! unary_proposition {
    ($operands:expr, $origin:expr, $ty:ident) => {{
        let operand = require_unary($operands, $origin)?;
        Ok(BuiltOperator::Proposition(Arc::new($ty::new(operand))))
    }};
}

macro_rules! unary_operand {
    ($operands:expr, $origin:expr, $ty:ident) => {{
        let operand = require_unary($operands, $origin)?;
        Ok(BuiltOperator::Operand(Arc::new($ty::new(operand))))
    }};
}

impl OperatorNamespace for StandardOperators {
    #[allow(clippy::too_many_lines)]
    fn build(&self, symbol: &str, operands: Vec<OperandHandle>) -> Option<RuleResult<BuiltOperator>> {
        let result: RuleResult<BuiltOperator> = match symbol {
            "eq" => binary_proposition!(operands, "eq", EqualTo),
            "ne" => binary_proposition!(operands, "ne", NotEqualTo),
            "is" => binary_proposition!(operands, "is", SameAs),
            "isNot" => binary_proposition!(operands, "isNot", NotSameAs),
            "gt" => binary_proposition!(operands, "gt", GreaterThan),
            "gte" => binary_proposition!(operands, "gte", GreaterThanOrEqualTo),
            "lt" => binary_proposition!(operands, "lt", LessThan),
            "lte" => binary_proposition!(operands, "lte", LessThanOrEqualTo),
            "in" => binary_proposition!(operands, "in", In),
            "notIn" => binary_proposition!(operands, "notIn", NotIn),
            "between" => binary_proposition!(operands, "between", Between),

            "add" => binary_operand!(operands, "add", Addition),
            "subtract" => binary_operand!(operands, "subtract", Subtraction),
            "multiply" => binary_operand!(operands, "multiply", Multiplication),
            "divide" => binary_operand!(operands, "divide", Division),
            "modulo" => binary_operand!(operands, "modulo", Modulo),
            "exponentiate" => binary_operand!(operands, "exponentiate", Exponentiate),
            "negate" => unary_operand!(operands, "negate", Negation),
            "abs" => unary_operand!(operands, "abs", Abs),
            "ceil" => unary_operand!(operands, "ceil", Ceil),
            "floor" => unary_operand!(operands, "floor", Floor),
            "round" => {
                let mut operands = match require_range(operands, "round", 1, 2) {
                    Ok(operands) => operands,
                    Err(err) => return Some(Err(err)),
                };
                let precision = (operands.len() == 2).then(|| operands.pop().expect("length checked above"));
                let value = operands.pop().expect("require_range guarantees at least 1");
                Ok(BuiltOperator::Operand(Arc::new(Round::new(value, precision))))
            }
            "min" => unary_operand!(operands, "min", Min),
            "max" => unary_operand!(operands, "max", Max),

            "contains" => binary_proposition!(operands, "contains", StringContains),
            "doesNotContain" => binary_proposition!(operands, "doesNotContain", StringDoesNotContain),
            "icontains" => binary_proposition!(operands, "icontains", StringContainsInsensitive),
            "doesNotContainInsensitive" => {
                binary_proposition!(operands, "doesNotContainInsensitive", StringDoesNotContainInsensitive)
            }
            "startsWith" => binary_proposition!(operands, "startsWith", StartsWith),
            "istartsWith" => binary_proposition!(operands, "istartsWith", StartsWithInsensitive),
            "endsWith" => binary_proposition!(operands, "endsWith", EndsWith),
            "iendsWith" => binary_proposition!(operands, "iendsWith", EndsWithInsensitive),
            "matches" => binary_proposition!(operands, "matches", Matches),
            "doesNotMatch" => binary_proposition!(operands, "doesNotMatch", DoesNotMatch),
            "stringLength" => unary_operand!(operands, "stringLength", StringLength),

            "union" => binary_operand!(operands, "union", Union),
            "intersect" => binary_operand!(operands, "intersect", Intersect),
            "complement" => binary_operand!(operands, "complement", Complement),
            "symmetricDifference" => binary_operand!(operands, "symmetricDifference", SymmetricDifference),
            "containsSubset" => binary_proposition!(operands, "containsSubset", ContainsSubset),
            "doesNotContainSubset" => binary_proposition!(operands, "doesNotContainSubset", DoesNotContainSubset),
            "setContains" => binary_proposition!(operands, "setContains", SetContains),
            "setDoesNotContain" => binary_proposition!(operands, "setDoesNotContain", SetDoesNotContain),

            "isArray" => unary_proposition!(operands, "isArray", IsArray),
            "isBoolean" => unary_proposition!(operands, "isBoolean", IsBoolean),
            "isEmpty" => unary_proposition!(operands, "isEmpty", IsEmpty),
            "isNull" => unary_proposition!(operands, "isNull", IsNull),
            "isNumeric" => unary_proposition!(operands, "isNumeric", IsNumeric),
            "isString" => unary_proposition!(operands, "isString", IsString),
            "arrayCount" => unary_operand!(operands, "arrayCount", ArrayCount),

            "after" => binary_proposition!(operands, "after", After),
            "before" => binary_proposition!(operands, "before", Before),
            "isBetweenDates" => binary_proposition!(operands, "isBetweenDates", IsBetweenDates),

            _ => return None,
        };
        Some(result)
    }
}

///
/// OperatorRegistry
///
/// Ordered list of namespaces (§4.6): [`StandardOperators`] first,
/// then any custom namespaces registered afterward. A custom
/// namespace can therefore only *add* symbols the standard library
/// doesn't already define — it cannot shadow a §6.4 symbol, since the
/// standard namespace always matches first. Extending the symbol
/// table (not overriding it) is the documented purpose of "custom
/// operators" in the source model.
pub struct OperatorRegistry {
    namespaces: Vec<Arc<dyn OperatorNamespace>>,
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self {
            namespaces: vec![Arc::new(StandardOperators)],
        }
    }
}

impl OperatorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a custom namespace, searched after every namespace
    /// registered so far.
    pub fn register(&mut self, namespace: Arc<dyn OperatorNamespace>) {
        self.namespaces.push(namespace);
    }

    /// Builds the operator named `symbol` against `operands`, trying
    /// each namespace in registration order. *Configuration error* if
    /// no namespace recognizes `symbol` at all.
    pub fn build(&self, symbol: &str, operands: Vec<OperandHandle>) -> RuleResult<BuiltOperator> {
        for namespace in &self.namespaces {
            if let Some(result) = namespace.build(symbol, operands.clone()) {
                return result;
            }
        }
        Err(RuleError::configuration("OperatorRegistry", format!("unknown operator symbol '{symbol}'")))
    }

    pub fn build_proposition(&self, symbol: &str, operands: Vec<OperandHandle>) -> RuleResult<PropositionHandle> {
        self.build(symbol, operands)?.into_proposition(symbol)
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("namespace_count", &self.namespaces.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_core::capability::Literal;
    use rule_core::Value;

    fn lit(v: Value) -> OperandHandle {
        Arc::new(Literal(v))
    }

    #[test]
    fn builds_comparison_by_symbol() {
        let registry = OperatorRegistry::new();
        let prop = registry
            .build_proposition("gte", vec![lit(Value::Int(25)), lit(Value::Int(18))])
            .unwrap();
        assert!(prop.evaluate(&rule_core::Context::new()).unwrap());
    }

    #[test]
    fn unknown_symbol_is_configuration_error() {
        let registry = OperatorRegistry::new();
        let err = registry.build("nonsense", vec![lit(Value::Int(1))]).unwrap_err();
        assert!(err.is_kind(rule_error::ErrorKind::Configuration));
    }

    #[test]
    fn wrong_arity_is_cardinality_violation() {
        let registry = OperatorRegistry::new();
        let err = registry.build("gte", vec![lit(Value::Int(1))]).unwrap_err();
        assert!(err.is_kind(rule_error::ErrorKind::Cardinality));
    }

    #[test]
    fn operand_producing_symbol_rejects_proposition_unwrap() {
        let registry = OperatorRegistry::new();
        let err = registry
            .build_proposition("add", vec![lit(Value::Int(1)), lit(Value::Int(2))])
            .unwrap_err();
        assert!(err.is_kind(rule_error::ErrorKind::Type));
    }

    #[test]
    fn round_accepts_one_or_two_operands() {
        let registry = OperatorRegistry::new();
        let default_precision = registry.build("round", vec![lit(Value::Float(3.7))]).unwrap();
        let with_precision = registry
            .build("round", vec![lit(Value::Float(3.14159)), lit(Value::Int(2))])
            .unwrap();
        let ctx = rule_core::Context::new();
        let BuiltOperator::Operand(op) = default_precision else {
            panic!("expected operand");
        };
        assert_eq!(op.prepare_value(&ctx).unwrap(), Value::Float(4.0));
        let BuiltOperator::Operand(op) = with_precision else {
            panic!("expected operand");
        };
        assert_eq!(op.prepare_value(&ctx).unwrap(), Value::Float(3.14));
    }

    #[derive(Debug)]
    struct DoubleItNamespace;

    impl OperatorNamespace for DoubleItNamespace {
        fn build(&self, symbol: &str, operands: Vec<OperandHandle>) -> Option<RuleResult<BuiltOperator>> {
            if symbol != "doubleIt" {
                return None;
            }
            Some(unary_operand!(operands, "doubleIt", DoubleOperand))
        }
    }

    #[derive(Debug)]
    struct DoubleOperand {
        operand: OperandHandle,
    }

    impl DoubleOperand {
        fn new(operand: OperandHandle) -> Self {
            Self { operand }
        }
    }

    impl rule_core::capability::Operand for DoubleOperand {
        fn prepare_value(&self, ctx: &rule_core::Context) -> RuleResult<Value> {
            self.operand.prepare_value(ctx)?.checked_mul(&Value::Int(2), "doubleIt")
        }
    }

    trait CheckedMul {
        fn checked_mul(&self, other: &Value, origin: &str) -> RuleResult<Value>;
    }

    impl CheckedMul for Value {
        fn checked_mul(&self, other: &Value, origin: &str) -> RuleResult<Value> {
            match (self, other) {
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a * b)),
                _ => Err(RuleError::type_error(origin, "expected integers")),
            }
        }
    }

    #[test]
    fn custom_namespace_extends_registry() {
        let mut registry = OperatorRegistry::new();
        registry.register(Arc::new(DoubleItNamespace));
        let built = registry.build("doubleIt", vec![lit(Value::Int(21))]).unwrap();
        let BuiltOperator::Operand(op) = built else {
            panic!("expected operand");
        };
        assert_eq!(op.prepare_value(&rule_core::Context::new()).unwrap(), Value::Int(42));
    }
}
