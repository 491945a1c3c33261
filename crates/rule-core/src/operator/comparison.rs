//! Comparison predicates (§4.4 "Comparison predicates (Binary)").

use rule_error::{RuleError, RuleResult};

use crate::capability::{OperandHandle, Proposition};
use crate::context::Context;
use crate::value::Value;

macro_rules! binary_predicate {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
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

binary_predicate!(EqualTo, "`lhs == rhs`, strict equality.");
binary_predicate!(NotEqualTo, "`lhs != rhs`, strict equality.");
binary_predicate!(SameAs, "Identical to `EqualTo` (§9 open question, resolved).");
binary_predicate!(NotSameAs, "Identical to `NotEqualTo`.");
binary_predicate!(GreaterThan, "`lhs > rhs`, natural ordering.");
binary_predicate!(GreaterThanOrEqualTo, "`¬ (lhs < rhs)`.");
binary_predicate!(LessThan, "`lhs < rhs`, natural ordering.");
binary_predicate!(LessThanOrEqualTo, "`¬ (lhs > rhs)`.");
binary_predicate!(In, "`lhs` is a strict member of the collection `rhs`.");
binary_predicate!(NotIn, "`¬ In`.");
binary_predicate!(Between, "`lhs` falls within the inclusive range `[rhs[0], rhs[1]]`.");

impl Proposition for EqualTo {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(self.lhs.prepare_value(ctx)?.equal_to(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for NotEqualTo {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(!self.lhs.prepare_value(ctx)?.equal_to(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for SameAs {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(self.lhs.prepare_value(ctx)?.same_as(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for NotSameAs {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(!self.lhs.prepare_value(ctx)?.same_as(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for GreaterThan {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(self.lhs.prepare_value(ctx)?.greater_than(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for GreaterThanOrEqualTo {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(!self.lhs.prepare_value(ctx)?.less_than(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for LessThan {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(self.lhs.prepare_value(ctx)?.less_than(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for LessThanOrEqualTo {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(!self.lhs.prepare_value(ctx)?.greater_than(&self.rhs.prepare_value(ctx)?))
    }
}

impl Proposition for In {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let needle = self.lhs.prepare_value(ctx)?;
        let haystack = self.rhs.prepare_value(ctx)?;
        if !haystack.is_array() {
            return Err(RuleError::type_error("In", "right-hand side is not a collection"));
        }
        Ok(haystack.get_set().set_contains(&needle))
    }
}

impl Proposition for NotIn {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let needle = self.lhs.prepare_value(ctx)?;
        let haystack = self.rhs.prepare_value(ctx)?;
        if !haystack.is_array() {
            return Err(RuleError::type_error("NotIn", "right-hand side is not a collection"));
        }
        Ok(!haystack.get_set().set_contains(&needle))
    }
}

impl Proposition for Between {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let value = self.lhs.prepare_value(ctx)?;
        let bounds = self.rhs.prepare_value(ctx)?;
        let Value::Array(bounds) = &bounds else {
            return Err(RuleError::type_error("Between", "bounds must be a 2-element collection"));
        };
        let [lo, hi] = &bounds[..] else {
            return Err(RuleError::type_error(
                "Between",
                format!("bounds must have exactly 2 elements, got {}", bounds.len()),
            ));
        };
        Ok((value.greater_than(lo) || value.equal_to(lo)) && (value.less_than(hi) || value.equal_to(hi)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Literal;
    use std::sync::Arc;

    fn lit(v: Value) -> OperandHandle {
        Arc::new(Literal(v))
    }

    #[test]
    fn comparison_duality_lt_gt() {
        let ctx = Context::new();
        let lt = LessThan::new(lit(Value::Int(3)), lit(Value::Int(7)));
        let gt = GreaterThan::new(lit(Value::Int(7)), lit(Value::Int(3)));
        assert_eq!(lt.evaluate(&ctx).unwrap(), gt.evaluate(&ctx).unwrap());
    }

    #[test]
    fn comparison_duality_ne_eq() {
        let ctx = Context::new();
        let ne = NotEqualTo::new(lit(Value::Int(1)), lit(Value::Int(2)));
        let eq = EqualTo::new(lit(Value::Int(1)), lit(Value::Int(2)));
        assert_eq!(ne.evaluate(&ctx).unwrap(), !eq.evaluate(&ctx).unwrap());
    }

    #[test]
    fn comparison_duality_gte_lt() {
        let ctx = Context::new();
        let gte = GreaterThanOrEqualTo::new(lit(Value::Int(5)), lit(Value::Int(5)));
        let lt = LessThan::new(lit(Value::Int(5)), lit(Value::Int(5)));
        assert_eq!(gte.evaluate(&ctx).unwrap(), !lt.evaluate(&ctx).unwrap());
    }

    #[test]
    fn in_requires_collection_right_side() {
        let ctx = Context::new();
        let in_op = In::new(lit(Value::Int(1)), lit(Value::Int(2)));
        assert!(in_op.evaluate(&ctx).is_err());
    }

    #[test]
    fn in_checks_strict_membership() {
        let ctx = Context::new();
        let in_op = In::new(
            lit(Value::Int(2)),
            lit(Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])),
        );
        assert!(in_op.evaluate(&ctx).unwrap());
    }

    #[test]
    fn between_is_inclusive() {
        let ctx = Context::new();
        let between = Between::new(
            lit(Value::Int(18)),
            lit(Value::Array(vec![Value::Int(18), Value::Int(65)])),
        );
        assert!(between.evaluate(&ctx).unwrap());
    }

    #[test]
    fn between_fails_on_wrong_shape() {
        let ctx = Context::new();
        let between = Between::new(lit(Value::Int(18)), lit(Value::Array(vec![Value::Int(18)])));
        assert!(between.evaluate(&ctx).is_err());
    }

    use proptest::prelude::*;

    proptest! {
        /// §8 "Comparison duality": `lt(a,b)` holds iff `gt(b,a)` does, for
        /// every pair of integers, not just the one example above.
        #[test]
        fn duality_lt_gt_holds_for_any_pair(a: i64, b: i64) {
            let ctx = Context::new();
            let lt = LessThan::new(lit(Value::Int(a)), lit(Value::Int(b)));
            let gt = GreaterThan::new(lit(Value::Int(b)), lit(Value::Int(a)));
            prop_assert_eq!(lt.evaluate(&ctx).unwrap(), gt.evaluate(&ctx).unwrap());
        }

        #[test]
        fn duality_ne_eq_holds_for_any_pair(a: i64, b: i64) {
            let ctx = Context::new();
            let ne = NotEqualTo::new(lit(Value::Int(a)), lit(Value::Int(b)));
            let eq = EqualTo::new(lit(Value::Int(a)), lit(Value::Int(b)));
            prop_assert_eq!(ne.evaluate(&ctx).unwrap(), !eq.evaluate(&ctx).unwrap());
        }

        #[test]
        fn duality_gte_lt_holds_for_any_pair(a: i64, b: i64) {
            let ctx = Context::new();
            let gte = GreaterThanOrEqualTo::new(lit(Value::Int(a)), lit(Value::Int(b)));
            let lt = LessThan::new(lit(Value::Int(a)), lit(Value::Int(b)));
            prop_assert_eq!(gte.evaluate(&ctx).unwrap(), !lt.evaluate(&ctx).unwrap());
        }
    }
}
