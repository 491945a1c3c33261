//! Logical connectives (§4.4 "Logical connectives").

use rule_error::RuleResult;

use crate::capability::{Proposition, PropositionHandle};
use crate::context::Context;

#[derive(Debug)]
pub struct LogicalNot {
    pub operand: PropositionHandle,
}

impl LogicalNot {
    #[must_use]
    pub fn new(operand: PropositionHandle) -> Self {
        Self { operand }
    }
}

impl Proposition for LogicalNot {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        Ok(!self.operand.evaluate(ctx)?)
    }
}

/// Short-circuits to `false` at the first `false` operand.
#[derive(Debug)]
pub struct LogicalAnd {
    pub operands: Vec<PropositionHandle>,
}

impl LogicalAnd {
    #[must_use]
    pub fn new(operands: Vec<PropositionHandle>) -> Self {
        Self { operands }
    }
}

impl Proposition for LogicalAnd {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        for operand in &self.operands {
            if !operand.evaluate(ctx)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Short-circuits to `true` at the first `true` operand.
#[derive(Debug)]
pub struct LogicalOr {
    pub operands: Vec<PropositionHandle>,
}

impl LogicalOr {
    #[must_use]
    pub fn new(operands: Vec<PropositionHandle>) -> Self {
        Self { operands }
    }
}

impl Proposition for LogicalOr {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        for operand in &self.operands {
            if operand.evaluate(ctx)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Exactly one operand true; short-circuits to `false` on the second `true`.
#[derive(Debug)]
pub struct LogicalXor {
    pub operands: Vec<PropositionHandle>,
}

impl LogicalXor {
    #[must_use]
    pub fn new(operands: Vec<PropositionHandle>) -> Self {
        Self { operands }
    }
}

impl Proposition for LogicalXor {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let mut seen_true = false;
        for operand in &self.operands {
            if operand.evaluate(ctx)? {
                if seen_true {
                    return Ok(false);
                }
                seen_true = true;
            }
        }
        Ok(seen_true)
    }
}

/// `¬(A ∧ B ∧ …)`; true as soon as any operand is false.
#[derive(Debug)]
pub struct LogicalNand {
    pub operands: Vec<PropositionHandle>,
}

impl LogicalNand {
    #[must_use]
    pub fn new(operands: Vec<PropositionHandle>) -> Self {
        Self { operands }
    }
}

impl Proposition for LogicalNand {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        for operand in &self.operands {
            if !operand.evaluate(ctx)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// `¬(A ∨ B ∨ …)`; false as soon as any operand is true.
#[derive(Debug)]
pub struct LogicalNor {
    pub operands: Vec<PropositionHandle>,
}

impl LogicalNor {
    #[must_use]
    pub fn new(operands: Vec<PropositionHandle>) -> Self {
        Self { operands }
    }
}

impl Proposition for LogicalNor {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        for operand in &self.operands {
            if operand.evaluate(ctx)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
