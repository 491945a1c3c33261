//! String predicates (§4.4 "String predicates (Binary unless noted)").
//!
//! `Matches`/`DoesNotMatch` use the `regex` crate — Rust's standard,
//! non-backtracking engine, a deliberate narrowing of the source's PCRE
//! dialect (§9 open question, resolved: documented in `SPEC_FULL.md`
//! §10.3, no runtime-selectable dialect).

use regex::Regex;
use rule_error::{RuleError, RuleResult};

use crate::capability::{Operand, OperandHandle, Proposition};
use crate::context::Context;
use crate::value::Value;

macro_rules! binary_predicate {
    ($name:ident) => {
        #[derive(Debug)]
        pub struct $name {
            pub lhs: OperandHandle,
            pub rhs: OperandHandle,
        }

        impl $name {
            #[must_use]
            pub fn new(lhs: OperandHandle, rhs: OperandHandle) -> Self {
                Self { lhs, rhs }
            }
        }
    };
}

binary_predicate!(StringContains);
binary_predicate!(StringDoesNotContain);
binary_predicate!(StringContainsInsensitive);
binary_predicate!(StringDoesNotContainInsensitive);
binary_predicate!(StartsWith);
binary_predicate!(StartsWithInsensitive);
binary_predicate!(EndsWith);
binary_predicate!(EndsWithInsensitive);
binary_predicate!(Matches);
binary_predicate!(DoesNotMatch);

impl Proposition for StringContains {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(self.lhs.prepare_value(ctx)?.string_contains(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for StringDoesNotContain {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(!self.lhs.prepare_value(ctx)?.string_contains(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for StringContainsInsensitive {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(self
            .lhs
            .prepare_value(ctx)?
            .string_contains_insensitive(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for StringDoesNotContainInsensitive {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(!self
            .lhs
            .prepare_value(ctx)?
            .string_contains_insensitive(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for StartsWith {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(self
            .lhs
            .prepare_value(ctx)?
            .starts_with(&self.rhs.prepare_value(ctx)?, false))
    }
}

impl Proposition for StartsWithInsensitive {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(self
            .lhs
            .prepare_value(ctx)?
            .starts_with(&self.rhs.prepare_value(ctx)?, true))
    }
}

impl Proposition for EndsWith {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(self
            .lhs
            .prepare_value(ctx)?
            .ends_with(&self.rhs.prepare_value(ctx)?, false))
    }
}

impl Proposition for EndsWithInsensitive {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(self
            .lhs
            .prepare_value(ctx)?
            .ends_with(&self.rhs.prepare_value(ctx)?, true))
    }
}

fn compile_pattern(value: &Value, origin: &str) -> RuleResult<Regex> {
    let Value::Text(pattern) = value else {
        return Err(RuleError::type_error(origin, "pattern operand is not a string"));
    };
    Regex::new(pattern).map_err(|err| RuleError::type_error(origin, format!("invalid regex: {err}")))
}

impl Proposition for Matches {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let subject = self.lhs.prepare_value(ctx)?;
        let Value::Text(text) = &subject else {
            return Err(RuleError::type_error("Matches", "left-hand side is not a string"));
        };
        let pattern = compile_pattern(&self.rhs.prepare_value(ctx)?, "Matches")?;
        Ok(pattern.is_match(text))
    }
}

impl Proposition for DoesNotMatch {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let subject = self.lhs.prepare_value(ctx)?;
        let Value::Text(text) = &subject else {
            return Err(RuleError::type_error("DoesNotMatch", "left-hand side is not a string"));
        };
        let pattern = compile_pattern(&self.rhs.prepare_value(ctx)?, "DoesNotMatch")?;
        Ok(!pattern.is_match(text))
    }
}

/// Unary. Fails with a type error if the operand isn't a string.
#[derive(Debug)]
pub struct StringLength {
    pub operand: OperandHandle,
}

impl StringLength {
    #[must_use]
    pub fn new(operand: OperandHandle) -> Self {
        Self { operand }
    }
}

impl Operand for StringLength {
    fn prepare_value(&self, ctx: &Context) -> RuleResult<Value> {
        let value = self.operand.prepare_value(ctx)?;
        let Value::Text(text) = &value else {
            return Err(RuleError::type_error("StringLength", "operand is not a string"));
        };
        Ok(Value::Int(i64::try_from(text.chars().count()).unwrap_or(i64::MAX)))
    }
}
