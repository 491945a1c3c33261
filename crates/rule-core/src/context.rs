//! Fact store with lazy, shared, and protected entries (§3, §4.3, §9).
//!
//! `Context` is deliberately *not* `Sync`: reading a shared factory
//! mutates the entry (memoize + freeze), so concurrent evaluation
//! requires one `Context` per thread, per §5's concurrency contract.
//! This mirrors how `icydb`'s `Context`-equivalents (its per-session
//! state) are built for single-writer access and never shared directly
//! across canister calls.

use std::cell::RefCell;
use std::sync::Arc;

use indexmap::IndexMap;
use rule_error::{RuleError, RuleResult};
use tracing::trace;

use crate::value::{ObjectValue, ProtectedMarker, Value};

/// A host-provided factory, invoked with the context itself so it can
/// read other facts while producing its value.
pub type FactoryFn = Arc<dyn Fn(&Context) -> RuleResult<Value> + Send + Sync>;

#[derive(Clone)]
enum Slot {
    Raw(Value),
    Factory {
        invoke: FactoryFn,
        shared: bool,
        protected: bool,
        marker: ObjectValue,
        resolved: Option<Value>,
        frozen: bool,
    },
}

///
/// Context
///
/// Maps name → entry. An entry is a raw value or a factory; factories
/// carry orthogonal `shared` (memoize-once, then freeze) and
/// `protected` (read returns the factory's own identity marker instead
/// of invoking it) flags.
#[derive(Default)]
pub struct Context {
    entries: RefCell<IndexMap<String, Slot>>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to a raw value. Fails if `name` is already bound to
    /// a frozen entry.
    pub fn set(&self, name: impl Into<String>, value: Value) -> RuleResult<()> {
        let name = name.into();
        let mut entries = self.entries.borrow_mut();
        if matches!(entries.get(&name), Some(Slot::Factory { frozen: true, .. })) {
            return Err(RuleError::context(
                "Context",
                format!("cannot write to frozen fact '{name}'"),
            ));
        }
        entries.insert(name, Slot::Raw(value));
        Ok(())
    }

    /// Bind `name` to a factory invoked lazily on read.
    pub fn set_factory(
        &self,
        name: impl Into<String>,
        factory: FactoryFn,
        shared: bool,
        protected: bool,
    ) -> RuleResult<()> {
        let name = name.into();
        let mut entries = self.entries.borrow_mut();
        if matches!(entries.get(&name), Some(Slot::Factory { frozen: true, .. })) {
            return Err(RuleError::context(
                "Context",
                format!("cannot write to frozen fact '{name}'"),
            ));
        }
        entries.insert(
            name.clone(),
            Slot::Factory {
                invoke: factory,
                shared,
                protected,
                marker: ObjectValue::new(ProtectedMarker { name }),
                resolved: None,
                frozen: false,
            },
        );
        Ok(())
    }

    /// Read a named fact. Fails on an undefined name.
    pub fn get(&self, name: &str) -> RuleResult<Value> {
        trace!(fact = name, "context.get");
        let existing = self.entries.borrow().get(name).cloned();
        let Some(slot) = existing else {
            return Err(RuleError::context("Context", format!("undefined fact '{name}'")));
        };

        match slot {
            Slot::Raw(value) => Ok(value),
            Slot::Factory { protected: true, marker, .. } => Ok(Value::Object(marker)),
            Slot::Factory {
                shared: true,
                resolved: Some(value),
                ..
            } => Ok(value),
            Slot::Factory {
                invoke,
                shared: true,
                resolved: None,
                marker,
                protected,
                ..
            } => {
                let value = invoke(self)?;
                let mut entries = self.entries.borrow_mut();
                entries.insert(
                    name.to_string(),
                    Slot::Factory {
                        invoke: Arc::clone(&invoke),
                        shared: true,
                        protected,
                        marker,
                        resolved: Some(value.clone()),
                        frozen: true,
                    },
                );
                Ok(value)
            }
            Slot::Factory { invoke, .. } => invoke(self),
        }
    }

    /// Whether `name` is bound to anything (raw or factory).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.borrow().contains_key(name)
    }

    /// All defined fact names, in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn unknown_key_fails() {
        let ctx = Context::new();
        assert!(ctx.get("missing").is_err());
    }

    #[test]
    fn raw_value_round_trips() {
        let ctx = Context::new();
        ctx.set("age", Value::Int(30)).unwrap();
        assert_eq!(ctx.get("age").unwrap(), Value::Int(30));
    }

    #[test]
    fn shared_factory_memoizes_and_freezes() {
        let ctx = Context::new();
        let calls = Rc::new(Cell::new(0));
        let calls_clone = Rc::clone(&calls);
        ctx.set_factory(
            "now",
            Arc::new(move |_| {
                calls_clone.set(calls_clone.get() + 1);
                Ok(Value::Int(42))
            }),
            true,
            false,
        )
        .unwrap();

        assert_eq!(ctx.get("now").unwrap(), Value::Int(42));
        assert_eq!(ctx.get("now").unwrap(), Value::Int(42));
        assert_eq!(calls.get(), 1);

        assert!(ctx.set("now", Value::Int(0)).is_err());
    }

    #[test]
    fn non_shared_factory_invokes_every_read() {
        let ctx = Context::new();
        let calls = Rc::new(Cell::new(0));
        let calls_clone = Rc::clone(&calls);
        ctx.set_factory(
            "counter",
            Arc::new(move |_| {
                calls_clone.set(calls_clone.get() + 1);
                Ok(Value::Int(calls_clone.get()))
            }),
            false,
            false,
        )
        .unwrap();

        assert_eq!(ctx.get("counter").unwrap(), Value::Int(1));
        assert_eq!(ctx.get("counter").unwrap(), Value::Int(2));
    }

    #[test]
    fn protected_factory_is_never_invoked() {
        let ctx = Context::new();
        ctx.set_factory(
            "secret",
            Arc::new(|_| panic!("protected factory must not be invoked")),
            false,
            true,
        )
        .unwrap();

        let first = ctx.get("secret").unwrap();
        let second = ctx.get("secret").unwrap();
        assert!(matches!(first, Value::Object(_)));
        assert_eq!(first, second);
    }

    #[test]
    fn names_lists_all_defined_facts() {
        let ctx = Context::new();
        ctx.set("a", Value::Int(1)).unwrap();
        ctx.set("b", Value::Int(2)).unwrap();
        assert_eq!(ctx.names(), vec!["a".to_string(), "b".to_string()]);
    }
}
