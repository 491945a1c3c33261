//! # rule-error
//!
//! Shared error taxonomy for the rule engine.
//!
//! Every fallible operation across `rule-core`, `rule-builder`, `rule-ast`,
//! and `rule-engine` returns `Result<T, RuleError>`. There is exactly one
//! error type for the whole engine: the six kinds below are already the
//! right granularity, and fragmenting them per crate would just force
//! conversions at every boundary instead of removing any.

use std::fmt;
use thiserror::Error as ThisError;

///
/// RuleError
///
/// Structured engine error carrying a stable kind plus the operator or
/// component that raised it and a human-readable reason.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{kind}: {origin}: {message}")]
pub struct RuleError {
    pub kind: ErrorKind,
    pub origin: String,
    pub message: String,
}

impl RuleError {
    #[must_use]
    pub fn new(kind: ErrorKind, origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin: origin.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn configuration(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, origin, message)
    }

    #[must_use]
    pub fn cardinality(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cardinality, origin, message)
    }

    #[must_use]
    pub fn type_error(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, origin, message)
    }

    #[must_use]
    pub fn domain(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Domain, origin, message)
    }

    #[must_use]
    pub fn context(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Context, origin, message)
    }

    #[must_use]
    pub fn structure(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Structure, origin, message)
    }

    #[must_use]
    pub const fn is_kind(&self, kind: ErrorKind) -> bool {
        matches!(
            (self.kind, kind),
            (ErrorKind::Configuration, ErrorKind::Configuration)
                | (ErrorKind::Cardinality, ErrorKind::Cardinality)
                | (ErrorKind::Type, ErrorKind::Type)
                | (ErrorKind::Domain, ErrorKind::Domain)
                | (ErrorKind::Context, ErrorKind::Context)
                | (ErrorKind::Structure, ErrorKind::Structure)
        )
    }
}

///
/// ErrorKind
///
/// The taxonomy of §7: six disjoint failure classes, none of which are
/// coupled to any particular operator or front-end implementation.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Unknown operator symbol, unknown combinator, unknown namespace.
    Configuration,
    /// Wrong operand count for an operator's declared cardinality.
    Cardinality,
    /// Operand value not of the kind an operator requires.
    Type,
    /// Division/modulo by zero, `min`/`max` on an empty set.
    Domain,
    /// Lookup of an undefined fact, write to a frozen fact.
    Context,
    /// Invalid rule node, `not` with a wrong child count, invalid action.
    Structure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration error",
            Self::Cardinality => "cardinality violation",
            Self::Type => "type error",
            Self::Domain => "domain error",
            Self::Context => "context error",
            Self::Structure => "structure error",
        };
        f.write_str(label)
    }
}

pub type RuleResult<T> = Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_kind_origin_message() {
        let err = RuleError::cardinality("LogicalNot", "expected 1 operand, got 2");
        let rendered = err.to_string();
        assert!(rendered.contains("cardinality violation"));
        assert!(rendered.contains("LogicalNot"));
        assert!(rendered.contains("expected 1 operand"));
    }

    #[test]
    fn is_kind_matches_only_its_own_variant() {
        let err = RuleError::domain("Modulo", "modulo by zero");
        assert!(err.is_kind(ErrorKind::Domain));
        assert!(!err.is_kind(ErrorKind::Type));
    }
}
