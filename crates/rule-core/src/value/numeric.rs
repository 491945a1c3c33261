//! Numeric coercion family for arithmetic and numeric ordering.
//!
//! Mirrors the `icydb-core` value module's approach of routing every
//! numeric operation through one explicit promotion policy instead of
//! scattering ad hoc `as` casts through the operator library
//! (`icydb-core/src/value/coercion.rs` in the teacher does the analogous
//! thing for its own scalar registry).

use num_traits::{FromPrimitive, ToPrimitive};
use rule_error::{RuleError, RuleResult};
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use std::cmp::Ordering;

use super::Value;

/// The widest common representation two numeric values should be
/// combined in. Decimal wins over Float wins over Int — an arithmetic
/// open question (SPEC_FULL.md §9) resolved here: mixing Int and Float
/// always promotes to Float; introducing a Decimal operand always
/// promotes to Decimal so no precision is silently lost.
#[derive(Clone, Copy, Debug)]
pub(super) enum NumericRepr {
    Int(i64),
    Float(f64),
    Decimal(Decimal),
}

impl Value {
    /// Whether this value participates in arithmetic directly (as
    /// opposed to `is_numeric`'s broader "or parses as a number").
    #[must_use]
    pub fn is_numeric_value(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_) | Self::Decimal(_))
    }

    pub(super) fn to_numeric(&self) -> Option<NumericRepr> {
        match self {
            Self::Int(i) => Some(NumericRepr::Int(*i)),
            Self::Float(f) => Some(NumericRepr::Float(*f)),
            Self::Decimal(d) => Some(NumericRepr::Decimal(*d)),
            _ => None,
        }
    }

    fn require_numeric(&self, origin: &str) -> RuleResult<NumericRepr> {
        self.to_numeric()
            .ok_or_else(|| RuleError::type_error(origin, format!("expected a numeric value, got {self:?}")))
    }

    /// Numeric ordering across the combined representation. `None` when
    /// either side is non-numeric.
    #[must_use]
    pub fn cmp_numeric(&self, other: &Self) -> Option<Ordering> {
        let (a, b) = (self.to_numeric()?, other.to_numeric()?);
        match promote(a, b) {
            (NumericRepr::Int(x), NumericRepr::Int(y)) => Some(x.cmp(&y)),
            (NumericRepr::Float(x), NumericRepr::Float(y)) => x.partial_cmp(&y),
            (NumericRepr::Decimal(x), NumericRepr::Decimal(y)) => Some(x.cmp(&y)),
            _ => unreachable!("promote always returns a same-variant pair"),
        }
    }

    pub(crate) fn checked_add(&self, other: &Self, origin: &str) -> RuleResult<Self> {
        binary_op(self, other, origin, |x, y| x.checked_add(y), |x, y| x + y, |x, y| {
            x.checked_add(y)
        })
    }

    pub(crate) fn checked_sub(&self, other: &Self, origin: &str) -> RuleResult<Self> {
        binary_op(self, other, origin, |x, y| x.checked_sub(y), |x, y| x - y, |x, y| {
            x.checked_sub(y)
        })
    }

    pub(crate) fn checked_mul(&self, other: &Self, origin: &str) -> RuleResult<Self> {
        binary_op(self, other, origin, |x, y| x.checked_mul(y), |x, y| x * y, |x, y| {
            x.checked_mul(y)
        })
    }

    /// True division. Int/Int promotes to Float so `7 / 2 == 3.5`; a
    /// Decimal operand keeps the result exact.
    pub(crate) fn checked_div(&self, other: &Self, origin: &str) -> RuleResult<Self> {
        let a = self.require_numeric(origin)?;
        let b = other.require_numeric(origin)?;
        if is_zero(b) {
            return Err(RuleError::domain(origin, "division by zero"));
        }
        let (a, b) = match (a, b) {
            (NumericRepr::Int(x), NumericRepr::Int(y)) => (NumericRepr::Float(x as f64), NumericRepr::Float(y as f64)),
            pair => promote(pair.0, pair.1),
        };
        Ok(match (a, b) {
            (NumericRepr::Float(x), NumericRepr::Float(y)) => Value::Float(x / y),
            (NumericRepr::Decimal(x), NumericRepr::Decimal(y)) => {
                x.checked_div(y)
                    .map(Value::Decimal)
                    .ok_or_else(|| RuleError::domain(origin, "division overflowed"))?
            }
            _ => unreachable!("division only promotes to Float or Decimal"),
        })
    }

    pub(crate) fn checked_modulo(&self, other: &Self, origin: &str) -> RuleResult<Self> {
        let a = self.require_numeric(origin)?;
        let b = other.require_numeric(origin)?;
        if is_zero(b) {
            return Err(RuleError::domain(origin, "modulo by zero"));
        }
        Ok(match promote(a, b) {
            (NumericRepr::Int(x), NumericRepr::Int(y)) => Value::Int(x.wrapping_rem(y)),
            (NumericRepr::Float(x), NumericRepr::Float(y)) => Value::Float(x % y),
            (NumericRepr::Decimal(x), NumericRepr::Decimal(y)) => Value::Decimal(x % y),
            _ => unreachable!(),
        })
    }

    pub(crate) fn checked_pow(&self, other: &Self, origin: &str) -> RuleResult<Self> {
        let a = self.require_numeric(origin)?;
        let b = other.require_numeric(origin)?;
        if let (NumericRepr::Int(base), NumericRepr::Int(exp)) = (a, b) {
            if let Ok(exp_u32) = u32::try_from(exp) {
                if let Some(result) = base.checked_pow(exp_u32) {
                    return Ok(Value::Int(result));
                }
            }
        }
        let (a, b) = promote(a, b);
        Ok(match (a, b) {
            (NumericRepr::Int(x), NumericRepr::Int(y)) => Value::Float((x as f64).powf(y as f64)),
            (NumericRepr::Float(x), NumericRepr::Float(y)) => Value::Float(x.powf(y)),
            (NumericRepr::Decimal(x), NumericRepr::Decimal(y)) => x
                .checked_powd(y)
                .map(Value::Decimal)
                .unwrap_or_else(|| Value::Float(to_float(NumericRepr::Decimal(x)).powf(to_float(NumericRepr::Decimal(y))))),
        })
    }

    pub(crate) fn checked_negate(&self, origin: &str) -> RuleResult<Self> {
        Ok(match self.require_numeric(origin)? {
            NumericRepr::Int(i) => Value::Int(-i),
            NumericRepr::Float(f) => Value::Float(-f),
            NumericRepr::Decimal(d) => Value::Decimal(-d),
        })
    }

    pub(crate) fn checked_abs(&self, origin: &str) -> RuleResult<Self> {
        Ok(match self.require_numeric(origin)? {
            NumericRepr::Int(i) => Value::Int(i.abs()),
            NumericRepr::Float(f) => Value::Float(f.abs()),
            NumericRepr::Decimal(d) => Value::Decimal(d.abs()),
        })
    }

    pub(crate) fn checked_ceil(&self, origin: &str) -> RuleResult<Self> {
        Ok(match self.require_numeric(origin)? {
            NumericRepr::Int(i) => Value::Int(i),
            NumericRepr::Float(f) => Value::Float(f.ceil()),
            NumericRepr::Decimal(d) => Value::Decimal(d.ceil()),
        })
    }

    pub(crate) fn checked_floor(&self, origin: &str) -> RuleResult<Self> {
        Ok(match self.require_numeric(origin)? {
            NumericRepr::Int(i) => Value::Int(i),
            NumericRepr::Float(f) => Value::Float(f.floor()),
            NumericRepr::Decimal(d) => Value::Decimal(d.floor()),
        })
    }

    pub(crate) fn checked_round(&self, precision: u32, origin: &str) -> RuleResult<Self> {
        Ok(match self.require_numeric(origin)? {
            NumericRepr::Int(i) => Value::Int(i),
            NumericRepr::Float(f) => {
                let factor = 10f64.powi(precision as i32);
                Value::Float((f * factor).round() / factor)
            }
            NumericRepr::Decimal(d) => Value::Decimal(d.round_dp(precision)),
        })
    }
}

fn binary_op(
    left: &Value,
    right: &Value,
    origin: &str,
    int_op: impl Fn(i64, i64) -> Option<i64>,
    float_op: impl Fn(f64, f64) -> f64,
    decimal_op: impl Fn(Decimal, Decimal) -> Option<Decimal>,
) -> RuleResult<Value> {
    let a = left.require_numeric(origin)?;
    let b = right.require_numeric(origin)?;
    Ok(match promote(a, b) {
        (NumericRepr::Int(x), NumericRepr::Int(y)) => match int_op(x, y) {
            Some(result) => Value::Int(result),
            None => Value::Float(float_op(x as f64, y as f64)),
        },
        (NumericRepr::Float(x), NumericRepr::Float(y)) => Value::Float(float_op(x, y)),
        (NumericRepr::Decimal(x), NumericRepr::Decimal(y)) => decimal_op(x, y)
            .map(Value::Decimal)
            .ok_or_else(|| RuleError::domain(origin, "decimal operation overflowed"))?,
        _ => unreachable!("promote always returns a same-variant pair"),
    })
}

fn is_zero(repr: NumericRepr) -> bool {
    match repr {
        NumericRepr::Int(i) => i == 0,
        NumericRepr::Float(f) => f == 0.0,
        NumericRepr::Decimal(d) => d.is_zero(),
    }
}

fn to_float(repr: NumericRepr) -> f64 {
    match repr {
        NumericRepr::Int(i) => i as f64,
        NumericRepr::Float(f) => f,
        NumericRepr::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
    }
}

fn to_decimal(repr: NumericRepr) -> Decimal {
    match repr {
        NumericRepr::Int(i) => Decimal::from(i),
        NumericRepr::Float(f) => Decimal::from_f64(f).unwrap_or(Decimal::ZERO),
        NumericRepr::Decimal(d) => d,
    }
}

/// Promote a pair of numeric representations to a shared variant:
/// `Decimal` if either side is `Decimal`, else `Float` if either side
/// is `Float`, else `Int`.
fn promote(a: NumericRepr, b: NumericRepr) -> (NumericRepr, NumericRepr) {
    match (a, b) {
        (NumericRepr::Int(_), NumericRepr::Int(_)) => (a, b),
        (NumericRepr::Decimal(_), _) | (_, NumericRepr::Decimal(_)) => {
            (NumericRepr::Decimal(to_decimal(a)), NumericRepr::Decimal(to_decimal(b)))
        }
        _ => (NumericRepr::Float(to_float(a)), NumericRepr::Float(to_float(b))),
    }
}
