//! `RuleBuilder` (§4.6 "builder facade") — the entry point a caller
//! constructs once per rule set, used to mint field handles and
//! assemble rules from propositions.

use std::cell::RefCell;
use std::sync::Arc;

use indexmap::IndexMap;
use rule_core::{ActionFn, PropositionHandle, Rule, Variable};

use crate::registry::OperatorRegistry;

///
/// RuleBuilder
///
/// Owns the field-variable cache (§8 "Variable identity": the same
/// field name always returns the same `Arc<Variable>` from a given
/// builder, so two conditions referencing `builder.field("age")` share
/// one node) and an [`OperatorRegistry`] that the structured AST loader
/// (`rule-ast`) resolves dynamic operator symbols against.
///
/// The source model indexes fields dynamically (`builder["age"]`);
/// `std::ops::Index` can't return a freshly-cached `Arc` through a
/// shared reference without fighting the borrow checker, so this is
/// the idiomatic Rust shape for the same behavior (documented as a
/// deliberate redesign in `DESIGN.md`).
pub struct RuleBuilder {
    fields: RefCell<IndexMap<String, Arc<Variable>>>,
    registry: OperatorRegistry,
}

impl Default for RuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: RefCell::new(IndexMap::new()),
            registry: OperatorRegistry::new(),
        }
    }

    /// Returns the field handle named `name`, creating it on first
    /// access. Subsequent calls with the same name return the same
    /// `Arc`, so dotted-property chains built off it (`.property(...)`)
    /// share their cache too.
    pub fn field(&self, name: impl Into<String>) -> Arc<Variable> {
        let name = name.into();
        if let Some(existing) = self.fields.borrow().get(&name) {
            return Arc::clone(existing);
        }
        let variable = Variable::named(name.clone());
        self.fields.borrow_mut().insert(name, Arc::clone(&variable));
        variable
    }

    #[must_use]
    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    /// Appends a custom operator namespace to this builder's registry
    /// (§4.6). Namespaces registered here are visible to both direct
    /// callers of `registry()` and the AST loader once it's handed
    /// this builder.
    pub fn register_namespace(&mut self, namespace: Arc<dyn crate::registry::OperatorNamespace>) {
        self.registry.register(namespace);
    }

    #[must_use]
    pub fn create(&self, condition: PropositionHandle) -> Arc<Rule> {
        Arc::new(Rule::new(condition))
    }

    #[must_use]
    pub fn create_with_action(&self, condition: PropositionHandle, action: ActionFn) -> Arc<Rule> {
        Arc::new(Rule::with_action(condition, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluent::OperandExt;
    use rule_core::Context;

    #[test]
    fn field_access_is_cached_by_name() {
        let builder = RuleBuilder::new();
        let first = builder.field("age");
        let second = builder.field("age");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn distinct_field_names_are_distinct_handles() {
        let builder = RuleBuilder::new();
        let age = builder.field("age");
        let name = builder.field("name");
        assert!(!Arc::ptr_eq(&age, &name));
    }

    #[test]
    fn built_rule_evaluates_against_context() {
        let builder = RuleBuilder::new();
        let ctx = Context::new();
        ctx.set("age", rule_core::Value::Int(21)).unwrap();

        let condition = builder.field("age").greater_than_or_equal_to(18);
        let rule = builder.create(condition);
        assert!(rule.evaluate(&ctx).unwrap());
    }

    #[test]
    fn registry_resolves_standard_symbols() {
        let builder = RuleBuilder::new();
        let lhs: rule_core::OperandHandle = builder.field("age");
        let rhs: rule_core::OperandHandle = Arc::new(rule_core::Literal(rule_core::Value::Int(18)));
        let prop = builder.registry().build_proposition("gte", vec![lhs, rhs]).unwrap();
        let ctx = Context::new();
        ctx.set("age", rule_core::Value::Int(40)).unwrap();
        assert!(prop.evaluate(&ctx).unwrap());
    }

    use proptest::prelude::*;

    proptest! {
        /// §8 "Variable identity": two accesses to the same field name via
        /// a builder return the same variable object, for any field name,
        /// not just "age".
        #[test]
        fn same_name_always_returns_the_same_handle(name in "[a-z]{1,12}") {
            let builder = RuleBuilder::new();
            let first = builder.field(name.clone());
            let second = builder.field(name);
            prop_assert!(Arc::ptr_eq(&first, &second));
        }

        #[test]
        fn distinct_names_never_share_a_handle(a in "[a-z]{1,12}", b in "[a-z]{1,12}") {
            prop_assume!(a != b);
            let builder = RuleBuilder::new();
            let first = builder.field(a);
            let second = builder.field(b);
            prop_assert!(!Arc::ptr_eq(&first, &second));
        }
    }
}
