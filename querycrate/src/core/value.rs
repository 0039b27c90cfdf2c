//! Runtime values read out of entity fields and the type tags that drive
//! coercion of textual filter values.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// Type tag of a leaf field, used to pick the coercion for filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Decimal,
    Boolean,
    Uuid,
    DateTime,
    Date,
    /// Fieldless enum; `members` lists variant names in declaration order
    Enum {
        name: &'static str,
        members: &'static [&'static str],
    },
}

impl ValueKind {
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Text)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Decimal => f.write_str("decimal"),
            Self::Boolean => f.write_str("boolean"),
            Self::Uuid => f.write_str("uuid"),
            Self::DateTime => f.write_str("date/time"),
            Self::Date => f.write_str("date"),
            Self::Enum { name, .. } => write!(f, "enum {name}"),
        }
    }
}

/// A member of a fieldless enum, identified by its declaration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumMember {
    pub index: usize,
    pub name: &'static str,
}

/// A polymorphic field value read from an entity or coerced from a filter
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Enum(EnumMember),
}

impl FieldValue {
    /// Get the value as a string slice if it is textual
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Compare two values of the same kind.
    ///
    /// Returns `None` when either side is null or the kinds differ, so range
    /// operators never accept a missing value.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Enum(a), Self::Enum(b)) => Some(a.index.cmp(&b.index)),
            _ => None,
        }
    }

    /// Total order used for sorting: nulls first, then by value.
    ///
    /// Text is compared ordinally, floats with `total_cmp`, enum members by
    /// declaration order.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            _ => self
                .compare(other)
                .unwrap_or_else(|| self.rank().cmp(&other.rank())),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Integer(_) => 2,
            Self::Float(_) => 3,
            Self::Decimal(_) => 4,
            Self::Text(_) => 5,
            Self::Uuid(_) => 6,
            Self::DateTime(_) => 7,
            Self::Date(_) => 8,
            Self::Enum(_) => 9,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => f.write_str(s),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Date(d) => write!(f, "{d}"),
            Self::Enum(member) => f.write_str(member.name),
        }
    }
}

/// A leaf type that can be read into a [`FieldValue`].
///
/// Implemented for the common scalar types, for `Option<V>` and, through
/// `#[derive(FilterEnum)]` or [`filter_enum!`](crate::filter_enum), for
/// fieldless enums. `u64` and `usize` do not fit `i64`, so they are read as
/// decimals. `i128` and `u128` are not supported.
pub trait FilterValue {
    fn kind() -> ValueKind;

    fn to_field_value(&self) -> FieldValue;
}

macro_rules! impl_filter_value_integer {
    ($($ty:ty),+) => {
        $(
            impl FilterValue for $ty {
                fn kind() -> ValueKind {
                    ValueKind::Integer
                }

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Integer(i64::from(*self))
                }
            }
        )+
    };
}

impl_filter_value_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_filter_value_wide_unsigned {
    ($($ty:ty),+) => {
        $(
            impl FilterValue for $ty {
                fn kind() -> ValueKind {
                    ValueKind::Decimal
                }

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Decimal(Decimal::from(*self))
                }
            }
        )+
    };
}

impl_filter_value_wide_unsigned!(u64, usize);

impl FilterValue for f32 {
    fn kind() -> ValueKind {
        ValueKind::Float
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

impl FilterValue for f64 {
    fn kind() -> ValueKind {
        ValueKind::Float
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl FilterValue for Decimal {
    fn kind() -> ValueKind {
        ValueKind::Decimal
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Decimal(*self)
    }
}

impl FilterValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Boolean
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }
}

impl FilterValue for String {
    fn kind() -> ValueKind {
        ValueKind::Text
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }
}

impl FilterValue for Uuid {
    fn kind() -> ValueKind {
        ValueKind::Uuid
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Uuid(*self)
    }
}

impl FilterValue for DateTime<Utc> {
    fn kind() -> ValueKind {
        ValueKind::DateTime
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl FilterValue for NaiveDate {
    fn kind() -> ValueKind {
        ValueKind::Date
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Date(*self)
    }
}

impl<V: FilterValue> FilterValue for Option<V> {
    fn kind() -> ValueKind {
        V::kind()
    }

    fn to_field_value(&self) -> FieldValue {
        self.as_ref().map_or(FieldValue::Null, FilterValue::to_field_value)
    }
}
