//! Type predicates (§4.4 "Type predicates (Unary)").

use rule_error::RuleResult;

use crate::capability::{Operand, OperandHandle, Proposition};
use crate::context::Context;
use crate::value::Value;

macro_rules! unary_type_predicate {
    ($name:ident, $doc:expr, $test:expr) => {
        #[doc = $doc]
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

        impl Proposition for $name {
            fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
                let value = self.operand.prepare_value(ctx)?;
                let test: fn(&Value) -> bool = $test;
                Ok(test(&value))
            }
        }
    };
}

unary_type_predicate!(IsArray, "True when the operand resolves to an array.", |v| v.is_array());
unary_type_predicate!(IsBoolean, "True when the operand resolves to a boolean.", |v| v.is_boolean());
unary_type_predicate!(
    IsEmpty,
    "True for null, empty string, empty collection, or numeric zero.",
    |v| v.is_empty()
);
unary_type_predicate!(IsNull, "True when the operand resolves to null.", |v| v.is_null());
unary_type_predicate!(
    IsNumeric,
    "True for a numeric value, or a string that parses as one.",
    |v| v.is_numeric()
);
unary_type_predicate!(IsString, "True when the operand resolves to a string.", |v| v.is_string());

/// Unary: array length, or a type error if the operand isn't an array.
#[derive(Debug)]
pub struct ArrayCount {
    pub operand: OperandHandle,
}

impl ArrayCount {
    #[must_use]
    pub fn new(operand: OperandHandle) -> Self {
        Self { operand }
    }
}

impl Operand for ArrayCount {
    fn prepare_value(&self, ctx: &Context) -> RuleResult<Value> {
        let set = self.operand.prepare_value(ctx)?.get_set();
        Ok(Value::Int(i64::try_from(set.count()).unwrap_or(i64::MAX)))
    }
}
