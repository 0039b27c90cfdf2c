//! Conversion of textual filter values into typed [`FieldValue`]s.
//!
//! Malformed input is always an error. Defaulting a bad `_minPrice` to zero
//! would silently widen the range.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::value::{EnumMember, FieldValue, ValueKind};
use crate::errors::{QueryError, Result};

const WILDCARD: char = '*';

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Which ends of a raw value carried a `*` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard {
    None,
    Leading,
    Trailing,
    Both,
}

/// Strip one leading and one trailing `*` from `raw`.
#[must_use]
pub fn strip_wildcards(raw: &str) -> (Wildcard, &str) {
    let (leading, rest) = match raw.strip_prefix(WILDCARD) {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let (trailing, rest) = match rest.strip_suffix(WILDCARD) {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let wildcard = match (leading, trailing) {
        (true, true) => Wildcard::Both,
        (true, false) => Wildcard::Leading,
        (false, true) => Wildcard::Trailing,
        (false, false) => Wildcard::None,
    };
    (wildcard, rest)
}

/// Convert `value` to the runtime type described by `kind`.
///
/// Text is returned unchanged. Everything else is trimmed and parsed
/// strictly; enum members match their names case-insensitively.
///
/// # Errors
///
/// `TypeConversion` naming the value and target type when parsing fails.
pub fn coerce(value: &str, kind: ValueKind) -> Result<FieldValue> {
    if kind.is_textual() {
        return Ok(FieldValue::Text(value.to_owned()));
    }

    let trimmed = value.trim();
    let parsed = match kind {
        ValueKind::Integer => trimmed.parse::<i64>().ok().map(FieldValue::Integer),
        ValueKind::Float => trimmed
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(FieldValue::Float),
        ValueKind::Decimal => Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
            .map(FieldValue::Decimal),
        ValueKind::Boolean => parse_bool(trimmed).map(FieldValue::Bool),
        ValueKind::Uuid => Uuid::parse_str(trimmed).ok().map(FieldValue::Uuid),
        ValueKind::DateTime => parse_date_time(trimmed).map(FieldValue::DateTime),
        ValueKind::Date => parse_date(trimmed).map(FieldValue::Date),
        ValueKind::Enum { members, .. } => members
            .iter()
            .position(|member| member.eq_ignore_ascii_case(trimmed))
            .map(|index| {
                FieldValue::Enum(EnumMember {
                    index,
                    name: members[index],
                })
            }),
        ValueKind::Text => Some(FieldValue::Text(value.to_owned())),
    };

    parsed.ok_or_else(|| QueryError::type_conversion(value, kind.to_string()))
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// RFC 3339 first, then offset-less timestamps and bare dates read as UTC.
fn parse_date_time(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| parse_date_time(value).map(|moment| moment.date_naive()))
}
