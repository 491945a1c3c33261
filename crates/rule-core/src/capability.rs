//! The two evaluation capabilities every tree node implements (§4, §9 —
//! "cyclic typing" redesign flag).
//!
//! The source model has `Operator` contain `Proposition`s while a
//! `LogicalOperator` is itself a `Proposition` — an inheritance cycle.
//! Rust has no classes to tie in a knot, so instead there are two small
//! object-safe traits, and concrete nodes implement whichever they need:
//! predicates implement [`Proposition`], value producers implement
//! [`Operand`], and nothing stops a type from implementing both.

use std::fmt;
use std::sync::Arc;

use rule_error::RuleResult;

use crate::context::Context;
use crate::value::Value;

/// A tree node that resolves to a [`Value`] against a context.
///
/// Implemented by `Variable`, `VariableProperty`, and every
/// value-producing operator (arithmetic, string length, set algebra,
/// `min`/`max`, ...).
pub trait Operand: fmt::Debug + Send + Sync {
    fn prepare_value(&self, ctx: &Context) -> RuleResult<Value>;
}

/// A tree node that resolves to a boolean against a context.
///
/// Implemented by logical connectives and every predicate operator
/// (comparison, string, set-membership, type, date).
pub trait Proposition: fmt::Debug + Send + Sync {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool>;
}

/// Shared handle to an [`Operand`], the unit operators store their
/// children as.
pub type OperandHandle = Arc<dyn Operand>;

/// Shared handle to a [`Proposition`].
pub type PropositionHandle = Arc<dyn Proposition>;

/// Adapts a literal `Value` into an [`Operand`] that ignores the
/// context — used when an operator's right-hand side is a literal
/// rather than a variable reference (§4.7's "otherwise ⇒ literal").
#[derive(Clone, Debug)]
pub struct Literal(pub Value);

impl Operand for Literal {
    fn prepare_value(&self, _ctx: &Context) -> RuleResult<Value> {
        Ok(self.0.clone())
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
