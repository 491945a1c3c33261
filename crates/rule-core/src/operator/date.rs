//! Date predicates (§4.4 "Date (Binary where relevant)").
//!
//! Dates have no dedicated `Value` kind (§3 enumerates the value model
//! exhaustively and it isn't in there) — a date is just a `Text` in
//! RFC 3339/ISO-8601 form, or an `Int` unix timestamp in seconds. These
//! operators are the only place that distinction matters, so the
//! parsing lives here rather than on `Value` itself.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rule_error::{RuleError, RuleResult};

use crate::capability::{OperandHandle, Proposition};
use crate::context::Context;
use crate::value::Value;

/// Common non-RFC-3339 date/time forms accepted alongside RFC 3339,
/// tried in order. `%Y-%m-%d` is the common bare-date case from the
/// spec's "common date forms" (§4.4).
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn parse_instant(value: &Value, origin: &str) -> RuleResult<DateTime<Utc>> {
    match value {
        Value::Int(seconds) => {
            DateTime::from_timestamp(*seconds, 0).ok_or_else(|| RuleError::type_error(origin, "timestamp out of range"))
        }
        Value::Text(text) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                return Ok(dt.with_timezone(&Utc));
            }
            for format in NAIVE_DATETIME_FORMATS {
                if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                    return Ok(naive.and_utc());
                }
            }
            if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                return Ok(date.and_hms_opt(0, 0, 0).expect("midnight is always valid").and_utc());
            }
            Err(RuleError::type_error(origin, format!("'{text}' is not a recognized date form")))
        }
        other => Err(RuleError::type_error(origin, format!("expected a date-shaped value, got {other:?}"))),
    }
}

/// `lhs > rhs`, both parsed as instants.
#[derive(Debug)]
pub struct After {
    pub lhs: OperandHandle,
    pub rhs: OperandHandle,
}

impl After {
    #[must_use]
    pub fn new(lhs: OperandHandle, rhs: OperandHandle) -> Self {
        Self { lhs, rhs }
    }
}

impl Proposition for After {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let lhs = parse_instant(&self.lhs.prepare_value(ctx)?, "After")?;
        let rhs = parse_instant(&self.rhs.prepare_value(ctx)?, "After")?;
        Ok(lhs > rhs)
    }
}

/// `lhs < rhs`, both parsed as instants.
#[derive(Debug)]
pub struct Before {
    pub lhs: OperandHandle,
    pub rhs: OperandHandle,
}

impl Before {
    #[must_use]
    pub fn new(lhs: OperandHandle, rhs: OperandHandle) -> Self {
        Self { lhs, rhs }
    }
}

impl Proposition for Before {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let lhs = parse_instant(&self.lhs.prepare_value(ctx)?, "Before")?;
        let rhs = parse_instant(&self.rhs.prepare_value(ctx)?, "Before")?;
        Ok(lhs < rhs)
    }
}

/// Binary: `lhs` is the date under test, `rhs` a 2-element
/// `[lo, hi]` collection; the range is inclusive, mirroring
/// `Between` (§4.4) but with date parsing on all three values.
#[derive(Debug)]
pub struct IsBetweenDates {
    pub lhs: OperandHandle,
    pub rhs: OperandHandle,
}

impl IsBetweenDates {
    #[must_use]
    pub fn new(lhs: OperandHandle, rhs: OperandHandle) -> Self {
        Self { lhs, rhs }
    }
}

impl Proposition for IsBetweenDates {
    fn evaluate(&self, ctx: &Context) -> RuleResult<bool> {
        let subject = parse_instant(&self.lhs.prepare_value(ctx)?, "IsBetweenDates")?;
        let bounds = self.rhs.prepare_value(ctx)?;
        let Value::Array(bounds) = &bounds else {
            return Err(RuleError::type_error("IsBetweenDates", "bounds must be a 2-element collection"));
        };
        let [lo, hi] = &bounds[..] else {
            return Err(RuleError::type_error(
                "IsBetweenDates",
                format!("bounds must have exactly 2 elements, got {}", bounds.len()),
            ));
        };
        let lo = parse_instant(lo, "IsBetweenDates")?;
        let hi = parse_instant(hi, "IsBetweenDates")?;
        Ok(subject >= lo && subject <= hi)
    }
}
