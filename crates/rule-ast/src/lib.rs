//! Structured rule format (§4.7, §6.2): JSON/YAML trees of
//! `{combinator|operator, field, value}` nodes, compiled into
//! `rule-core` operator trees via a `rule-builder::RuleBuilder`.

pub mod convert;
pub mod fact;
pub mod loader;

pub use fact::FactRecord;
pub use loader::load_node;
