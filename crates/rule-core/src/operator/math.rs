//! Mathematical operators (§4.4 "Mathematical (produce Value)").

use rule_error::{RuleError, RuleResult};

use crate::capability::{Operand, OperandHandle};
use crate::context::Context;
use crate::value::Value;

macro_rules! binary_math {
    ($name:ident, $origin:expr, $method:ident) => {
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

        impl Operand for $name {
            fn prepare_value(&self, ctx: &Context) -> RuleResult<Value> {
                let lhs = self.lhs.prepare_value(ctx)?;
                let rhs = self.rhs.prepare_value(ctx)?;
                lhs.$method(&rhs, $origin)
            }
        }
    };
}

binary_math!(Addition, "Addition", checked_add);
binary_math!(Subtraction, "Subtraction", checked_sub);
binary_math!(Multiplication, "Multiplication", checked_mul);
binary_math!(Division, "Division", checked_div);
binary_math!(Modulo, "Modulo", checked_modulo);
binary_math!(Exponentiate, "Exponentiate", checked_pow);

macro_rules! unary_math {
    ($name:ident, $origin:expr, $method:ident) => {
        #[derive(Debug)]
        pub struct $name {
            pub operand: OperandHandle,
        }

        impl $name {
            #[must_use]
            pub fn new(operand: OperandHandle) -> Self {
                Self { operand }
            }
        }

        impl Operand for $name {
            fn prepare_value(&self, ctx: &Context) -> RuleResult<Value> {
                self.operand.prepare_value(ctx)?.$method($origin)
            }
        }
    };
}

unary_math!(Negation, "Negation", checked_negate);
unary_math!(Abs, "Abs", checked_abs);
unary_math!(Ceil, "Ceil", checked_ceil);
unary_math!(Floor, "Floor", checked_floor);

/// Multiple: 1 or 2 operands — value, and an optional precision
/// (default `0`).
#[derive(Debug)]
pub struct Round {
    pub value: OperandHandle,
    pub precision: Option<OperandHandle>,
}

impl Round {
    #[must_use]
    pub fn new(value: OperandHandle, precision: Option<OperandHandle>) -> Self {
        Self { value, precision }
    }
}

impl Operand for Round {
    fn prepare_value(&self, ctx: &Context) -> RuleResult<Value> {
        let value = self.value.prepare_value(ctx)?;
        let precision = match &self.precision {
            None => 0,
            Some(operand) => match operand.prepare_value(ctx)? {
                Value::Int(i) if i >= 0 => u32::try_from(i).unwrap_or(0),
                other => {
                    return Err(RuleError::type_error(
                        "Round",
                        format!("precision must be a non-negative integer, got {other:?}"),
                    ));
                }
            },
        };
        value.checked_round(precision, "Round")
    }
}

/// Unary over a collection operand: `self.operand.prepare_value(ctx).get_set().min()`.
#[derive(Debug)]
pub struct Min {
    pub operand: OperandHandle,
}

impl Min {
    #[must_use]
    pub fn new(operand: OperandHandle) -> Self {
        Self { operand }
    }
}

impl Operand for Min {
    fn prepare_value(&self, ctx: &Context) -> RuleResult<Value> {
        self.operand.prepare_value(ctx)?.get_set().min("Min")
    }
}

#[derive(Debug)]
pub struct Max {
    pub operand: OperandHandle,
}

impl Max {
    #[must_use]
    pub fn new(operand: OperandHandle) -> Self {
        Self { operand }
    }
}

impl Operand for Max {
    fn prepare_value(&self, ctx: &Context) -> RuleResult<Value> {
        self.operand.prepare_value(ctx)?.get_set().max("Max")
    }
}
