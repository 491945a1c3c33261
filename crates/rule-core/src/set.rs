//! Immutable deduplicated collection with set algebra (§4.2).
//!
//! Grounded in the construction/normalization discipline of
//! `icydb-core`'s `Value`/`FilterExpr` modules: a `Set` is built once,
//! pure, and every algebraic operation returns a fresh `Set` rather than
//! mutating in place.

use derive_more::Deref;
use rule_error::{RuleError, RuleResult};

use crate::value::Value;

///
/// Set
///
/// Ordered, deduplicated view over a `Value`. Construction rules
/// (§4.2): `Null` becomes empty; a non-collection value wraps to a
/// length-1 set; `Array` contents recursively normalize (nested arrays
/// become nested `Set`-shaped `Value`s); duplicates are removed by
/// strict equality. `Deref`s to its element slice for iteration.
#[derive(Clone, Debug, Deref, PartialEq)]
pub struct Set {
    #[deref]
    elements: Vec<Value>,
}

impl Set {
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self { elements: Vec::new() },
            Value::Array(items) => {
                let mut elements: Vec<Value> = Vec::with_capacity(items.len());
                for item in items {
                    let normalized = normalize_element(item);
                    if !elements.iter().any(|existing| existing.equal_to(&normalized)) {
                        elements.push(normalized);
                    }
                }
                Self { elements }
            }
            other => Self {
                elements: vec![other.clone()],
            },
        }
    }

    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut elements: Vec<Value> = Vec::new();
        for value in values {
            let normalized = normalize_element(&value);
            if !elements.iter().any(|existing| existing.equal_to(&normalized)) {
                elements.push(normalized);
            }
        }
        Self { elements }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Array(self.elements)
    }

    /// Strict-equality membership test. Collection-shaped values are
    /// compared structurally as nested sets, matching §4.2.
    #[must_use]
    pub fn set_contains(&self, value: &Value) -> bool {
        match value {
            Value::Array(_) => {
                let nested = Self::from_value(value);
                self.elements
                    .iter()
                    .any(|existing| Self::from_value(existing) == nested)
            }
            other => self.elements.iter().any(|existing| existing.equal_to(other)),
        }
    }

    /// True when every element of `other` is present in `self`.
    #[must_use]
    pub fn contains_subset(&self, other: &Self) -> bool {
        other.elements.iter().all(|e| self.set_contains(e))
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut elements = self.elements.clone();
        for value in &other.elements {
            if !elements.iter().any(|existing| existing.equal_to(value)) {
                elements.push(value.clone());
            }
        }
        Self { elements }
    }

    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let elements = self
            .elements
            .iter()
            .filter(|value| other.set_contains(value))
            .cloned()
            .collect();
        Self { elements }
    }

    /// Elements of `self` not present in `other`.
    #[must_use]
    pub fn complement(&self, other: &Self) -> Self {
        let elements = self
            .elements
            .iter()
            .filter(|value| !other.set_contains(value))
            .cloned()
            .collect();
        Self { elements }
    }

    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.complement(other).union(&other.complement(self))
    }

    /// `Null` for an empty set; a domain error if any element is
    /// non-numeric.
    pub fn min(&self, origin: &str) -> RuleResult<Value> {
        self.extremum(origin, |a, b| a.cmp_numeric(b))
    }

    pub fn max(&self, origin: &str) -> RuleResult<Value> {
        self.extremum(origin, |a, b| b.cmp_numeric(a))
    }

    fn extremum(
        &self,
        origin: &str,
        less_than: impl Fn(&Value, &Value) -> Option<std::cmp::Ordering>,
    ) -> RuleResult<Value> {
        if self.elements.is_empty() {
            return Ok(Value::Null);
        }
        for value in &self.elements {
            if !value.is_numeric_value() {
                return Err(RuleError::type_error(
                    origin,
                    format!("set contains a non-numeric element: {value:?}"),
                ));
            }
        }
        let mut best = &self.elements[0];
        for value in &self.elements[1..] {
            if less_than(value, best) == Some(std::cmp::Ordering::Less) {
                best = value;
            }
        }
        Ok(best.clone())
    }
}

fn normalize_element(value: &Value) -> Value {
    match value {
        Value::Array(_) => Set::from_value(value).into_value(),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr(values: Vec<Value>) -> Value {
        Value::Array(values)
    }

    #[test]
    fn construction_dedups_by_strict_equality() {
        let set = Set::from_value(&arr(vec![Value::Int(1), Value::Int(1), Value::Int(2)]));
        assert_eq!(set.count(), 2);
    }

    #[test]
    fn null_becomes_empty() {
        assert!(Set::from_value(&Value::Null).is_empty());
    }

    #[test]
    fn scalar_wraps_to_singleton() {
        assert_eq!(Set::from_value(&Value::Int(5)).count(), 1);
    }

    #[test]
    fn union_is_commutative_as_a_set() {
        let a = Set::from_value(&arr(vec![Value::Int(1), Value::Int(2)]));
        let b = Set::from_value(&arr(vec![Value::Int(2), Value::Int(3)]));
        let ab = a.union(&b);
        let ba = b.union(&a);
        assert_eq!(ab.count(), ba.count());
        for value in ab.elements() {
            assert!(ba.set_contains(value));
        }
    }

    #[test]
    fn intersect_is_subset_of_left() {
        let a = Set::from_value(&arr(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
        let b = Set::from_value(&arr(vec![Value::Int(2), Value::Int(3), Value::Int(4)]));
        let i = a.intersect(&b);
        assert!(a.contains_subset(&i));
    }

    #[test]
    fn complement_with_self_is_empty() {
        let a = Set::from_value(&arr(vec![Value::Int(1), Value::Int(2)]));
        assert!(a.complement(&a).is_empty());
    }

    #[test]
    fn symmetric_difference_matches_law() {
        let a = Set::from_value(&arr(vec![Value::Int(1), Value::Int(2)]));
        let b = Set::from_value(&arr(vec![Value::Int(2), Value::Int(3)]));
        let sym = a.symmetric_difference(&b);
        let expected = a.complement(&b).union(&b.complement(&a));
        assert_eq!(sym.count(), expected.count());
        for value in sym.elements() {
            assert!(expected.set_contains(value));
        }
    }

    #[test]
    fn min_max_require_numeric_elements() {
        let set = Set::from_value(&arr(vec![Value::Int(3), Value::Text("x".to_string())]));
        assert!(set.min("Min").is_err());
        assert!(set.max("Max").is_err());
    }

    #[test]
    fn min_max_on_empty_set_is_null() {
        let set = Set::from_value(&Value::Null);
        assert_eq!(set.min("Min").unwrap(), Value::Null);
        assert_eq!(set.max("Max").unwrap(), Value::Null);
    }

    #[test]
    fn contains_subset_example_from_spec() {
        let tags = Set::from_value(&arr(vec![
            Value::Text("a".to_string()),
            Value::Text("b".to_string()),
            Value::Text("c".to_string()),
        ]));
        let subset = Set::from_value(&arr(vec![Value::Text("a".to_string()), Value::Text("c".to_string())]));
        let not_subset = Set::from_value(&arr(vec![Value::Text("a".to_string()), Value::Text("d".to_string())]));
        assert!(tags.contains_subset(&subset));
        assert!(!tags.contains_subset(&not_subset));
    }

    use proptest::prelude::*;

    fn set_from_ints(values: Vec<i64>) -> Set {
        Set::from_value(&arr(values.into_iter().map(Value::Int).collect()))
    }

    proptest! {
        /// §8 "Set uniqueness": `count` equals the distinct-under-strict-equality
        /// count of the input, for arbitrary integer vectors, not just one example.
        #[test]
        fn count_matches_distinct_count(xs in proptest::collection::vec(-100i64..100, 0..20)) {
            let set = set_from_ints(xs.clone());
            let mut distinct: Vec<i64> = Vec::new();
            for x in xs {
                if !distinct.contains(&x) {
                    distinct.push(x);
                }
            }
            prop_assert_eq!(set.count(), distinct.len());
        }

        /// §8 "Set algebra laws": `union(A,B) = union(B,A)` as sets.
        #[test]
        fn union_is_commutative(a in proptest::collection::vec(-20i64..20, 0..10), b in proptest::collection::vec(-20i64..20, 0..10)) {
            let a = set_from_ints(a);
            let b = set_from_ints(b);
            let ab = a.union(&b);
            let ba = b.union(&a);
            prop_assert_eq!(ab.count(), ba.count());
            for value in ab.elements() {
                prop_assert!(ba.set_contains(value));
            }
        }

        /// §8 "Set algebra laws": `intersect(A,B) ⊆ A`.
        #[test]
        fn intersect_is_always_a_subset_of_left(a in proptest::collection::vec(-20i64..20, 0..10), b in proptest::collection::vec(-20i64..20, 0..10)) {
            let a = set_from_ints(a);
            let b = set_from_ints(b);
            prop_assert!(a.contains_subset(&a.intersect(&b)));
        }

        /// §8 "Set algebra laws": `complement(A,A) = ∅`.
        #[test]
        fn complement_with_self_is_always_empty(a in proptest::collection::vec(-20i64..20, 0..10)) {
            let a = set_from_ints(a);
            prop_assert!(a.complement(&a).is_empty());
        }

        /// §8 "Set algebra laws": `symmetric_difference(A,B) = union(complement(A,B), complement(B,A))`.
        #[test]
        fn symmetric_difference_matches_law_for_any_pair(a in proptest::collection::vec(-20i64..20, 0..10), b in proptest::collection::vec(-20i64..20, 0..10)) {
            let a = set_from_ints(a);
            let b = set_from_ints(b);
            let sym = a.symmetric_difference(&b);
            let expected = a.complement(&b).union(&b.complement(&a));
            prop_assert_eq!(sym.count(), expected.count());
            for value in sym.elements() {
                prop_assert!(expected.set_contains(value));
            }
        }
    }
}
