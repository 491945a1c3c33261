//! Immutable typed value model (§3, §4.1).
//!
//! A `Value` never mutates after construction: every operation here
//! takes `&self` and returns a new `Value` or a primitive. This mirrors
//! `icydb-core/src/value/mod.rs` in the teacher, whose `Value` enum is
//! likewise an immutable, exhaustively-matched scalar/collection union —
//! trimmed here to the kinds this spec actually names (no candid/IC
//! scalar kinds: accounts, principals, ulids, and so on have no
//! counterpart in a fact-record rule engine).

mod compare;
mod numeric;
mod object;
mod text;


use indexmap::IndexMap;
use rust_decimal::Decimal;

pub use object::{FactObject, ObjectValue, ProtectedMarker};

use crate::set::Set;

///
/// Value
///
/// Wraps exactly one of: null, boolean, integer, floating-point,
/// string, an exact decimal, an opaque host object (identity-hashable),
/// a nested mapping, or an array. `Map` and `Array` are the two
/// collection-shaped kinds; only `Array` is a "collection" for the
/// purposes of `Set` construction (§4.2) — `Map` models a fact
/// sub-record, not an iterable sequence.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Object(ObjectValue),
    Map(IndexMap<String, Value>),
    Array(Vec<Value>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// A value or string that parses as a number — broader than
    /// `is_numeric_value` (§4 Type predicates: `IsNumeric`).
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().parse::<f64>().is_ok(),
            other => other.is_numeric_value(),
        }
    }

    /// Null, empty string, empty collection, or numeric zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Array(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Int(i) => *i == 0,
            Self::Float(f) => *f == 0.0,
            Self::Decimal(d) => d.is_zero(),
            Self::Bool(_) | Self::Object(_) => false,
        }
    }

    /// A `Set` view of this value (§4.2): `Array` unwraps to its
    /// elements, everything else (including `Map`, a structured record
    /// rather than a sequence) wraps to a length-1 set.
    #[must_use]
    pub fn get_set(&self) -> Set {
        Set::from_value(self)
    }
}
