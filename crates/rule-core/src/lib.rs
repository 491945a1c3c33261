//! Value model, fact store, and evaluation primitives for the rule engine.
//!
//! Layered bottom-up, each module only depending on the ones before it:
//! `value` (scalars and collections) → `set` (set algebra over `Value`) →
//! `context` (the fact store rules read from) → `capability`
//! (`Operand`/`Proposition`, the evaluation seam) → `variable` (dotted
//! property resolution) → `operator` (the concrete operator library) →
//! `rule` (`Rule`/`RuleSet`).

pub mod capability;
pub mod context;
pub mod operator;
pub mod rule;
pub mod set;
pub mod value;
pub mod variable;

pub use capability::{Literal, Operand, OperandHandle, Proposition, PropositionHandle};
pub use context::Context;
pub use rule::{ActionFn, Rule, RuleSet};
pub use rule_error::{ErrorKind, RuleError, RuleResult};
pub use set::Set;
pub use value::{FactObject, ObjectValue, ProtectedMarker, Value};
pub use variable::{Variable, VariableProperty};
