//! Rule and RuleSet (§4.5, §9 "Identity-keyed RuleSet dedup").

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rule_error::RuleResult;
use tracing::instrument;

use crate::capability::PropositionHandle;
use crate::context::Context;

/// An action invoked when a rule's condition evaluates to `true`.
/// Whether an action may mutate the `Context` it receives is left
/// unspecified by the spec (§9 open question) — this engine does not
/// forbid it; the action simply receives `&Context`, and `Context`'s
/// own interior mutability (§3) is what makes that possible at all.
pub type ActionFn = Arc<dyn Fn(&Context) -> RuleResult<()> + Send + Sync>;

///
/// Rule
///
/// `(condition, action)`. `evaluate` delegates to the condition;
/// `execute` additionally runs the action when the condition holds.
/// There is no "invalid action" error path here (§7, error kind 6)
/// because `ActionFn` is a typed Rust closure — a value of the wrong
/// shape simply doesn't type-check, so the error kind only matters to
/// front-ends that accept actions from untyped data (out of scope:
/// §1's structured AST carries no action field at all, see §4.7).
pub struct Rule {
    condition: PropositionHandle,
    action: Option<ActionFn>,
}

impl Rule {
    #[must_use]
    pub fn new(condition: PropositionHandle) -> Self {
        Self { condition, action: None }
    }

    #[must_use]
    pub fn with_action(condition: PropositionHandle, action: ActionFn) -> Self {
        Self {
            condition,
            action: Some(action),
        }
    }

    #[instrument(level = "trace", skip(self, ctx))]
    pub fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        self.condition.evaluate(ctx)
    }

    /// Evaluates the condition and, if true, runs the action. Returns
    /// the condition's result either way.
    pub fn execute(&self, ctx: &Context) -> RuleResult<bool> {
        let matched = self.evaluate(ctx)?;
        if matched {
            if let Some(action) = &self.action {
                action(ctx)?;
            }
        }
        Ok(matched)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("condition", &self.condition)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

///
/// RuleSet
///
/// Rules keyed by identity (the `Arc` allocation's address), not
/// structural equality, so re-adding the same rule object is a no-op
/// while two distinct-but-equivalent rule trees are both kept (§9).
/// Backed by `IndexMap` so `execute_rules` runs them in insertion
/// order (§5 "Ordering").
#[derive(Default)]
pub struct RuleSet {
    rules: IndexMap<usize, Arc<Rule>>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `rule`. Returns `false` without inserting when this exact
    /// rule object (by identity) is already present.
    pub fn add(&mut self, rule: Arc<Rule>) -> bool {
        let key = Arc::as_ptr(&rule) as usize;
        if self.rules.contains_key(&key) {
            return false;
        }
        self.rules.insert(key, rule);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn rules(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.values()
    }

    /// Executes every rule in insertion order, returning each one's
    /// result. The first error aborts the run (§7: "internals
    /// propagate"; no partial-results contract covers `RuleSet`).
    pub fn execute_rules(&self, ctx: &Context) -> RuleResult<Vec<bool>> {
        self.rules.values().map(|rule| rule.execute(ctx)).collect()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet").field("len", &self.len()).finish()
    }
}
