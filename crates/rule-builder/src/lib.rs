//! Fluent and dynamic construction layer over `rule-core` (§4.6).
//!
//! `fluent` gives callers with known-at-compile-time rule shapes a
//! typed chain (`builder.field("age").greater_than_or_equal_to(18)`);
//! `registry` gives callers who only learn operator names and operand
//! counts at runtime (the structured AST loader, custom extension
//! points) a string-keyed alternative. `builder` ties both to a single
//! `RuleBuilder` that owns field-variable identity.

pub mod builder;
pub mod fluent;
pub mod registry;

pub use builder::RuleBuilder;
pub use fluent::{logical_and, logical_nand, logical_nor, logical_not, logical_or, logical_xor, IntoOperand, IntoOperandValue, OperandExt, PropositionExt};
pub use registry::{normalize_symbol, BuiltOperator, OperatorNamespace, OperatorRegistry, StandardOperators};
