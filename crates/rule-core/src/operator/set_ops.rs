//! Set-algebra operators (§4.4 "Set").

use rule_error::RuleResult;

use crate::capability::{Operand, OperandHandle, Proposition};
use crate::context::Context;
use crate::value::Value;

macro_rules! set_value_op {
    ($name:ident, $method:ident) => {
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
                let lhs = self.lhs.prepare_value(ctx)?.get_set();
                let rhs = self.rhs.prepare_value(ctx)?.get_set();
                Ok(lhs.$method(&rhs).into_value())
            }
        }
    };
}

set_value_op!(Union, union);
set_value_op!(Intersect, intersect);
set_value_op!(Complement, complement);
set_value_op!(SymmetricDifference, symmetric_difference);

macro_rules! set_predicate {
    ($name:ident, $method:ident, $negate:expr) => {
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

        impl Proposition for $name {
            fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
                let lhs = self.lhs.prepare_value(ctx)?.get_set();
                let rhs = self.rhs.prepare_value(ctx)?;
                let result = lhs.$method(&rhs);
                Ok(if $negate { !result } else { result })
            }
        }
    };
}

set_predicate!(SetContains, set_contains, false);
set_predicate!(SetDoesNotContain, set_contains, true);

#[derive(Debug)]
pub struct ContainsSubset {
    pub lhs: OperandHandle,
    pub rhs: OperandHandle,
}

impl ContainsSubset {
    #[must_use]
    pub fn new(lhs: OperandHandle, rhs: OperandHandle) -> Self {
        Self { lhs, rhs }
    }
}

impl Proposition for ContainsSubset {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let lhs = self.lhs.prepare_value(ctx)?.get_set();
        let rhs = self.rhs.prepare_value(ctx)?.get_set();
        Ok(lhs.contains_subset(&rhs))
    }
}

#[derive(Debug)]
pub struct DoesNotContainSubset {
    pub lhs: OperandHandle,
    pub rhs: OperandHandle,
}

impl DoesNotContainSubset {
    #[must_use]
    pub fn new(lhs: OperandHandle, rhs: OperandHandle) -> Self {
        Self { lhs, rhs }
    }
}

impl Proposition for DoesNotContainSubset {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let lhs = self.lhs.prepare_value(ctx)?.get_set();
        let rhs = self.rhs.prepare_value(ctx)?.get_set();
        Ok(!lhs.contains_subset(&rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Literal;
    use std::sync::Arc;

    fn arr(values: Vec<Value>) -> OperandHandle {
        Arc::new(Literal(Value::Array(values)))
    }

    #[test]
    fn union_dedups() {
        let ctx = Context::new();
        let union = Union::new(
            arr(vec![Value::Int(1), Value::Int(2)]),
            arr(vec![Value::Int(2), Value::Int(3)]),
        );
        let Value::Array(items) = union.prepare_value(&ctx).unwrap() else {
            panic!("expected array");
        };
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn contains_subset_matches_spec_scenario() {
        let ctx = Context::new();
        let tags = arr(vec![
            Value::Text("a".to_string()),
            Value::Text("b".to_string()),
            Value::Text("c".to_string()),
        ]);
        let subset = arr(vec![Value::Text("a".to_string()), Value::Text("c".to_string())]);
        let not_subset = arr(vec![Value::Text("a".to_string()), Value::Text("d".to_string())]);

        assert!(ContainsSubset::new(tags.clone(), subset).evaluate(&ctx).unwrap());
        assert!(!ContainsSubset::new(tags, not_subset).evaluate(&ctx).unwrap());
    }

    #[test]
    fn set_contains_scalar_membership() {
        let ctx = Context::new();
        let op = SetContains::new(arr(vec![Value::Int(1), Value::Int(2)]), Arc::new(Literal(Value::Int(2))));
        assert!(op.evaluate(&ctx).unwrap());
    }
}
