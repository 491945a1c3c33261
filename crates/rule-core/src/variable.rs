//! Named operands and dotted property navigation (§4.3).
//!
//! The source model has a `Variable → VariableProperty → Variable-as-operand`
//! inheritance chain (§9 redesign flag: "deep inheritance chain"). Flattened
//! here into two plain structs sharing one resolution shape: `Variable`
//! reads directly from the context; `VariableProperty` resolves its parent
//! first, then applies the method > field > keyed-access > mapping-key >
//! default priority ladder to the parent's resolved value.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rule_error::RuleResult;

use crate::capability::{Operand, OperandHandle};
use crate::context::Context;
use crate::value::Value;

type PropertyCache = RefCell<IndexMap<String, Arc<VariableProperty>>>;

///
/// Variable
///
/// `(name, default)`. `prepare_value` returns `ctx[name]` when `name`
/// is bound, else `default`; a variable with no name always yields its
/// default (useful for literal-shaped operands built by a front-end
/// that always goes through the variable path).
pub struct Variable {
    name: Option<String>,
    default: Value,
    children: PropertyCache,
}

impl Variable {
    #[must_use]
    pub fn new(name: Option<String>, default: Value) -> Arc<Self> {
        Arc::new(Self {
            name,
            default,
            children: RefCell::new(IndexMap::new()),
        })
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Arc<Self> {
        Self::new(Some(name.into()), Value::Null)
    }

    #[must_use]
    pub fn literal(default: Value) -> Arc<Self> {
        Self::new(None, default)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Navigate to `name` off this variable, caching the child node so
    /// repeated lookups of the same dotted segment return the same
    /// object (§8 "Variable identity").
    pub fn property(self: &Arc<Self>, name: impl Into<String>) -> Arc<VariableProperty> {
        cached_property(&self.children, Arc::clone(self) as OperandHandle, name, Value::Null)
    }

    pub fn property_with_default(
        self: &Arc<Self>,
        name: impl Into<String>,
        default: Value,
    ) -> Arc<VariableProperty> {
        cached_property(&self.children, Arc::clone(self) as OperandHandle, name, default)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.name)
            .field("default", &self.default)
            .finish()
    }
}

impl Operand for Variable {
    fn prepare_value(&self, ctx: &Context) -> RuleResult<Value> {
        match &self.name {
            None => Ok(self.default.clone()),
            Some(name) => {
                if ctx.contains(name) {
                    ctx.get(name)
                } else {
                    Ok(self.default.clone())
                }
            }
        }
    }
}

///
/// VariableProperty
///
/// `(parent, name, default)`. Resolves `parent`, then looks up `name`
/// against the resolved value with the priority from §4.3: named
/// zero-arg method, then field, then keyed access (all three only
/// apply to `Value::Object`), then a mapping key (only for
/// `Value::Map`), else `default`.
pub struct VariableProperty {
    parent: OperandHandle,
    name: String,
    default: Value,
    children: PropertyCache,
}

impl VariableProperty {
    #[must_use]
    pub fn new(parent: OperandHandle, name: impl Into<String>, default: Value) -> Arc<Self> {
        Arc::new(Self {
            parent,
            name: name.into(),
            default,
            children: RefCell::new(IndexMap::new()),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property(self: &Arc<Self>, name: impl Into<String>) -> Arc<Self> {
        cached_property(&self.children, Arc::clone(self) as OperandHandle, name, Value::Null)
    }
}

impl fmt::Debug for VariableProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableProperty")
            .field("name", &self.name)
            .field("default", &self.default)
            .finish()
    }
}

impl Operand for VariableProperty {
    fn prepare_value(&self, ctx: &Context) -> RuleResult<Value> {
        let parent_value = self.parent.prepare_value(ctx)?;
        Ok(resolve_property(&parent_value, &self.name).unwrap_or_else(|| self.default.clone()))
    }
}

fn cached_property(
    cache: &PropertyCache,
    parent: OperandHandle,
    name: impl Into<String>,
    default: Value,
) -> Arc<VariableProperty> {
    let name = name.into();
    if let Some(existing) = cache.borrow().get(&name) {
        return Arc::clone(existing);
    }
    let node = VariableProperty::new(parent, name.clone(), default);
    cache.borrow_mut().insert(name, Arc::clone(&node));
    node
}

/// Method > field > keyed-access > mapping-key, in that order. Only
/// `Object` supports the first three; only `Map` supports the fourth.
fn resolve_property(value: &Value, name: &str) -> Option<Value> {
    match value {
        Value::Object(object) => {
            let fact = object.as_fact_object();
            fact.call_method(name)
                .or_else(|| fact.get_field(name))
                .or_else(|| fact.get_keyed(name))
        }
        Value::Map(entries) => entries.get(name).cloned(),
        _ => None,
    }
}
