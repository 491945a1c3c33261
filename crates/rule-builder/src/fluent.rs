//! Fluent, statically-typed chain construction (§6.1).
//!
//! `b["user"]["age"].greater_than_or_equal_to(18).logical_and(...)` from
//! the spec becomes method calls on `OperandHandle`/`PropositionHandle`
//! here: every method below has fixed Rust-level arity, so none of
//! these can ever raise a *cardinality violation* — the struct each one
//! builds simply has the right number of fields. That error kind is
//! reserved for the registry-driven dynamic path (`registry.rs`), which
//! is what the structured AST loader (`rule-ast`) actually needs.

use std::sync::Arc;

use rule_core::capability::{Operand, OperandHandle, Proposition, PropositionHandle};
use rule_core::operator::comparison::{
    Between, EqualTo, GreaterThan, GreaterThanOrEqualTo, In, LessThan, LessThanOrEqualTo, NotEqualTo, NotIn, NotSameAs,
    SameAs,
};
use rule_core::operator::date::{After, Before, IsBetweenDates};
use rule_core::operator::logical::{LogicalAnd, LogicalNand, LogicalNor, LogicalNot, LogicalOr, LogicalXor};
use rule_core::operator::math::{Abs, Addition, Ceil, Division, Exponentiate, Floor, Max, Min, Modulo, Multiplication, Negation, Round, Subtraction};
use rule_core::operator::set_ops::{Complement, ContainsSubset, DoesNotContainSubset, Intersect, SetContains, SetDoesNotContain, SymmetricDifference, Union};
use rule_core::operator::string_ops::{
    DoesNotMatch, EndsWith, EndsWithInsensitive, Matches, StartsWith, StartsWithInsensitive, StringContains,
    StringContainsInsensitive, StringDoesNotContain, StringDoesNotContainInsensitive, StringLength,
};
use rule_core::operator::type_ops::{ArrayCount, IsArray, IsBoolean, IsEmpty, IsNull, IsNumeric, IsString};
use rule_core::Value;

/// Anything that can be turned into an [`OperandHandle`] for a fluent
/// chain's right-hand side: an already-built operand, or a literal
/// Rust value wrapped as [`rule_core::capability::Literal`].
pub trait IntoOperand {
    fn into_operand(self) -> OperandHandle;
}

/// Covers both the trait-object alias `OperandHandle` (`T = dyn
/// Operand`) and concrete handles like `Arc<Variable>` or
/// `Arc<VariableProperty>` — the latter keep their inherent
/// `.property(...)` method for dotted chains while still picking up
/// every [`OperandExt`] method below.
impl<T> IntoOperand for Arc<T>
where
    T: Operand + ?Sized + 'static,
{
    fn into_operand(self) -> OperandHandle {
        self
    }
}

impl IntoOperand for Value {
    fn into_operand(self) -> OperandHandle {
        Arc::new(rule_core::capability::Literal(self))
    }
}

macro_rules! into_operand_via_value {
    ($ty:ty, $variant:ident) => {
        impl IntoOperand for $ty {
            fn into_operand(self) -> OperandHandle {
                Value::$variant(self.into()).into_operand()
            }
        }
    };
}

into_operand_via_value!(i64, Int);
into_operand_via_value!(i32, Int);
into_operand_via_value!(f64, Float);
into_operand_via_value!(bool, Bool);
into_operand_via_value!(String, Text);

impl IntoOperand for &str {
    fn into_operand(self) -> OperandHandle {
        Value::Text(self.to_string()).into_operand()
    }
}

impl<T> IntoOperand for Vec<T>
where
    T: IntoOperandValue,
{
    fn into_operand(self) -> OperandHandle {
        Value::Array(self.into_iter().map(IntoOperandValue::into_value).collect()).into_operand()
    }
}

/// Narrower than [`IntoOperand`]: converts straight to a [`Value`],
/// needed so `Vec<T>` can build one `Value::Array` instead of an array
/// of single-element operands.
pub trait IntoOperandValue {
    fn into_value(self) -> Value;
}

impl IntoOperandValue for i64 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl IntoOperandValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl IntoOperandValue for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoOperandValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

/// Extension methods on any `OperandHandle`-convertible left-hand side,
/// covering §6.4's Comparison, Mathematical, String, Set, Type, and
/// Date symbol groups.
pub trait OperandExt: IntoOperand + Clone {
    fn equal_to(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(EqualTo::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn not_equal_to(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(NotEqualTo::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn same_as(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(SameAs::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn not_same_as(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(NotSameAs::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn greater_than(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(GreaterThan::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn greater_than_or_equal_to(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(GreaterThanOrEqualTo::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn less_than(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(LessThan::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn less_than_or_equal_to(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(LessThanOrEqualTo::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn is_in(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(In::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn not_in(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(NotIn::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn between(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(Between::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn after(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(After::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn before(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(Before::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn is_between_dates(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(IsBetweenDates::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn add(&self, rhs: impl IntoOperand) -> OperandHandle {
        Arc::new(Addition::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn subtract(&self, rhs: impl IntoOperand) -> OperandHandle {
        Arc::new(Subtraction::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn multiply(&self, rhs: impl IntoOperand) -> OperandHandle {
        Arc::new(Multiplication::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn divide(&self, rhs: impl IntoOperand) -> OperandHandle {
        Arc::new(Division::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn modulo(&self, rhs: impl IntoOperand) -> OperandHandle {
        Arc::new(Modulo::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn exponentiate(&self, rhs: impl IntoOperand) -> OperandHandle {
        Arc::new(Exponentiate::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn negate(&self) -> OperandHandle {
        Arc::new(Negation::new(self.clone().into_operand()))
    }

    fn abs(&self) -> OperandHandle {
        Arc::new(Abs::new(self.clone().into_operand()))
    }

    fn ceil(&self) -> OperandHandle {
        Arc::new(Ceil::new(self.clone().into_operand()))
    }

    fn floor(&self) -> OperandHandle {
        Arc::new(Floor::new(self.clone().into_operand()))
    }

    fn round(&self, precision: Option<i64>) -> OperandHandle {
        Arc::new(Round::new(
            self.clone().into_operand(),
            precision.map(|p| Value::Int(p).into_operand()),
        ))
    }

    fn min(&self) -> OperandHandle {
        Arc::new(Min::new(self.clone().into_operand()))
    }

    fn max(&self) -> OperandHandle {
        Arc::new(Max::new(self.clone().into_operand()))
    }

    fn contains(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(StringContains::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn does_not_contain(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(StringDoesNotContain::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn icontains(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(StringContainsInsensitive::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn does_not_contain_insensitive(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(StringDoesNotContainInsensitive::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn starts_with(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(StartsWith::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn istarts_with(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(StartsWithInsensitive::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn ends_with(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(EndsWith::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn iends_with(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(EndsWithInsensitive::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn matches(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(Matches::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn does_not_match(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(DoesNotMatch::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn string_length(&self) -> OperandHandle {
        Arc::new(StringLength::new(self.clone().into_operand()))
    }

    fn union(&self, rhs: impl IntoOperand) -> OperandHandle {
        Arc::new(Union::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn intersect(&self, rhs: impl IntoOperand) -> OperandHandle {
        Arc::new(Intersect::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn complement(&self, rhs: impl IntoOperand) -> OperandHandle {
        Arc::new(Complement::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn symmetric_difference(&self, rhs: impl IntoOperand) -> OperandHandle {
        Arc::new(SymmetricDifference::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn contains_subset(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(ContainsSubset::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn does_not_contain_subset(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(DoesNotContainSubset::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn set_contains(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(SetContains::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn set_does_not_contain(&self, rhs: impl IntoOperand) -> PropositionHandle {
        Arc::new(SetDoesNotContain::new(self.clone().into_operand(), rhs.into_operand()))
    }

    fn is_array(&self) -> PropositionHandle {
        Arc::new(IsArray::new(self.clone().into_operand()))
    }

    fn is_boolean(&self) -> PropositionHandle {
        Arc::new(IsBoolean::new(self.clone().into_operand()))
    }

    fn is_empty(&self) -> PropositionHandle {
        Arc::new(IsEmpty::new(self.clone().into_operand()))
    }

    fn is_null(&self) -> PropositionHandle {
        Arc::new(IsNull::new(self.clone().into_operand()))
    }

    fn is_numeric(&self) -> PropositionHandle {
        Arc::new(IsNumeric::new(self.clone().into_operand()))
    }

    fn is_string(&self) -> PropositionHandle {
        Arc::new(IsString::new(self.clone().into_operand()))
    }

    fn array_count(&self) -> OperandHandle {
        Arc::new(ArrayCount::new(self.clone().into_operand()))
    }
}

impl<T> OperandExt for Arc<T> where T: Operand + ?Sized + 'static {}

/// Extension methods for composing propositions (§4.4 "Logical
/// connectives"). Implemented for `PropositionHandle` so a predicate
/// built off an [`OperandExt`] method can be chained directly:
/// `a.greater_than(1).logical_and(b.equal_to(2))`.
pub trait PropositionExt {
    fn logical_and(&self, other: PropositionHandle) -> PropositionHandle;
    fn logical_or(&self, other: PropositionHandle) -> PropositionHandle;
    fn logical_xor(&self, other: PropositionHandle) -> PropositionHandle;
    fn logical_nand(&self, other: PropositionHandle) -> PropositionHandle;
    fn logical_nor(&self, other: PropositionHandle) -> PropositionHandle;
    fn logical_not(&self) -> PropositionHandle;
}

impl PropositionExt for PropositionHandle {
    fn logical_and(&self, other: PropositionHandle) -> PropositionHandle {
        Arc::new(LogicalAnd::new(vec![Arc::clone(self), other]))
    }

    fn logical_or(&self, other: PropositionHandle) -> PropositionHandle {
        Arc::new(LogicalOr::new(vec![Arc::clone(self), other]))
    }

    fn logical_xor(&self, other: PropositionHandle) -> PropositionHandle {
        Arc::new(LogicalXor::new(vec![Arc::clone(self), other]))
    }

    fn logical_nand(&self, other: PropositionHandle) -> PropositionHandle {
        Arc::new(LogicalNand::new(vec![Arc::clone(self), other]))
    }

    fn logical_nor(&self, other: PropositionHandle) -> PropositionHandle {
        Arc::new(LogicalNor::new(vec![Arc::clone(self), other]))
    }

    fn logical_not(&self) -> PropositionHandle {
        Arc::new(LogicalNot::new(Arc::clone(self)))
    }
}

/// Variadic logical-connective helpers, matching the builder's
/// "Factory helpers `logical_and/or/not/xor`" (§4.6).
#[must_use]
pub fn logical_and(operands: Vec<PropositionHandle>) -> PropositionHandle {
    Arc::new(LogicalAnd::new(operands))
}

#[must_use]
pub fn logical_or(operands: Vec<PropositionHandle>) -> PropositionHandle {
    Arc::new(LogicalOr::new(operands))
}

#[must_use]
pub fn logical_xor(operands: Vec<PropositionHandle>) -> PropositionHandle {
    Arc::new(LogicalXor::new(operands))
}

#[must_use]
pub fn logical_nand(operands: Vec<PropositionHandle>) -> PropositionHandle {
    Arc::new(LogicalNand::new(operands))
}

#[must_use]
pub fn logical_nor(operands: Vec<PropositionHandle>) -> PropositionHandle {
    Arc::new(LogicalNor::new(operands))
}

#[must_use]
pub fn logical_not(operand: PropositionHandle) -> PropositionHandle {
    Arc::new(LogicalNot::new(operand))
}
