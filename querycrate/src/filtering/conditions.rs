//! Predicate compilation.
//!
//! Each filter key becomes one [`KeyCondition`]: the values listed under the
//! key are OR-combined, and all keys are AND-combined. The operator applied to
//! a value is decided once, here, from the key prefix and the value's
//! wildcard markers:
//!
//! | key / value          | textual field                  | other fields      |
//! |----------------------|--------------------------------|-------------------|
//! | `name` = `*lar*`     | contains, case-insensitive     | equals `lar`      |
//! | `name` = `*lar`      | ends with, case-insensitive    | equals `lar`      |
//! | `name` = `lar*`      | starts with, case-insensitive  | equals `lar`      |
//! | `name` = `lar`       | equals, case-insensitive       | equals            |
//! | `_minName` = `v`     | `>= v` (ordinal)               | `>= v`            |
//! | `_maxName` = `v`     | `<= v` (ordinal)               | `<= v`            |
//!
//! Bounds drop any `*` markers before parsing, so `_minPrice=45*` is `_minPrice=45`.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::core::schema::{Filterable, Schema};
use crate::core::value::{FieldValue, ValueKind};
use crate::errors::Result;
use crate::models::FilterMap;

use super::coercion::{Wildcard, coerce, strip_wildcards};
use super::joined::Accessor;
use super::limits::QueryLimits;
use super::path::{PropertyPath, RangeMarker, resolve, split_range_marker};

/// A single comparison against one filter value.
///
/// Text operands are stored lower-cased; matching lower-cases the field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOperator {
    Equals(FieldValue),
    StartsWith(String),
    EndsWith(String),
    Contains(String),
    /// Inclusive lower bound
    Min(FieldValue),
    /// Inclusive upper bound
    Max(FieldValue),
}

impl FilterOperator {
    /// Build the operator for one raw value of a field of type `kind`.
    ///
    /// # Errors
    ///
    /// `TypeConversion` when the value does not parse as `kind`.
    pub fn parse(marker: Option<RangeMarker>, kind: ValueKind, raw: &str) -> Result<Self> {
        if let Some(marker) = marker {
            // Bounds ignore wildcard markers whatever the field type
            let (_, stripped) = strip_wildcards(raw.trim());
            let bound = coerce(stripped, kind)?;
            return Ok(match marker {
                RangeMarker::Min => Self::Min(bound),
                RangeMarker::Max => Self::Max(bound),
            });
        }

        if kind.is_textual() {
            let (wildcard, text) = strip_wildcards(raw);
            let text = text.to_lowercase();
            return Ok(match wildcard {
                Wildcard::Both => Self::Contains(text),
                Wildcard::Leading => Self::EndsWith(text),
                Wildcard::Trailing => Self::StartsWith(text),
                Wildcard::None => Self::Equals(FieldValue::Text(text)),
            });
        }

        // Wildcards mean nothing outside text; compare against what is left
        let (_, stripped) = strip_wildcards(raw.trim());
        coerce(stripped, kind).map(Self::Equals)
    }

    /// Whether `value` satisfies this operator. Null satisfies nothing.
    #[must_use]
    pub fn matches(&self, value: &FieldValue) -> bool {
        match self {
            Self::Equals(FieldValue::Text(expected)) => {
                value.as_text().is_some_and(|actual| actual.to_lowercase() == *expected)
            }
            Self::Equals(expected) => value.compare(expected) == Some(Ordering::Equal),
            Self::StartsWith(prefix) => lowered(value).is_some_and(|text| text.starts_with(prefix.as_str())),
            Self::EndsWith(suffix) => lowered(value).is_some_and(|text| text.ends_with(suffix.as_str())),
            Self::Contains(needle) => lowered(value).is_some_and(|text| text.contains(needle.as_str())),
            Self::Min(bound) => value.compare(bound).is_some_and(Ordering::is_ge),
            Self::Max(bound) => value.compare(bound).is_some_and(Ordering::is_le),
        }
    }

    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::Min(_) | Self::Max(_))
    }
}

fn lowered(value: &FieldValue) -> Option<String> {
    value.as_text().map(str::to_lowercase)
}

/// Every value listed under one filter key, OR-combined.
///
/// Keys that differ only in spelling (`Category` and `category`,
/// `items.productId` and `Items_ProductId`) share one condition.
pub struct KeyCondition<T> {
    key: String,
    marker: Option<RangeMarker>,
    path: PropertyPath,
    operators: Vec<FilterOperator>,
    accessor: Accessor<T>,
}

impl<T> KeyCondition<T> {
    /// The first spelling of the key seen in the filter map
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn path(&self) -> &PropertyPath {
        &self.path
    }

    #[must_use]
    pub fn operators(&self) -> &[FilterOperator] {
        &self.operators
    }

    /// True when the condition is tested against the elements of a collection
    #[must_use]
    pub const fn is_quantified(&self) -> bool {
        matches!(self.accessor, Accessor::Any(_))
    }

    #[must_use]
    pub fn matches(&self, entity: &T) -> bool {
        let test = |value: &FieldValue| self.operators.iter().any(|op| op.matches(value));
        match &self.accessor {
            Accessor::Value(get) => test(&get(entity)),
            Accessor::Any(quantifier) => quantifier(entity, &test),
        }
    }
}

impl<T> fmt::Debug for KeyCondition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyCondition")
            .field("key", &self.key)
            .field("path", &self.path.to_string())
            .field("operators", &self.operators)
            .field("quantified", &self.is_quantified())
            .finish()
    }
}

/// The AND of all key conditions of a filter map.
///
/// An empty predicate accepts every entity.
pub struct CompiledPredicate<T> {
    conditions: Vec<KeyCondition<T>>,
}

impl<T> CompiledPredicate<T> {
    /// A predicate with no conditions
    #[must_use]
    pub const fn accept_all() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    #[must_use]
    pub fn matches(&self, entity: &T) -> bool {
        self.conditions.iter().all(|condition| condition.matches(entity))
    }

    pub fn conditions(&self) -> impl Iterator<Item = &KeyCondition<T>> {
        self.conditions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl<T> fmt::Debug for CompiledPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.conditions).finish()
    }
}

/// Compile every entry of `filters` against `schema`.
///
/// Keys whose value list is empty add no condition. Keys resolving to the
/// same path with the same range marker are merged and their values
/// OR-combined.
///
/// # Errors
///
/// The first `UnknownProperty`, `UnsupportedPath`, `TypeConversion` or
/// `LimitExceeded` encountered. No partial predicate is returned.
pub fn compile_filter<T: Filterable>(
    schema: &Schema<T>,
    filters: &FilterMap,
    limits: &QueryLimits,
) -> Result<CompiledPredicate<T>> {
    limits.validate_filter_keys(filters.len())?;

    let mut conditions = Vec::with_capacity(filters.len());
    for (key, values) in filters.iter() {
        if values.is_empty() {
            continue;
        }
        limits.validate_values(values)?;

        let (marker, _) = split_range_marker(key);
        let resolved = resolve(schema, key)?;
        let operators = values
            .iter()
            .map(|raw| FilterOperator::parse(marker, resolved.kind, raw))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            entity = schema.entity(),
            key,
            path = %resolved.path,
            operators = operators.len(),
            collection = resolved.path.crosses_collection(),
            "compiled filter key"
        );
        if let Some(existing) = conditions
            .iter_mut()
            .find(|condition: &&mut KeyCondition<T>| {
                condition.marker == marker && condition.path == resolved.path
            })
        {
            existing.operators.extend(operators);
            continue;
        }
        conditions.push(KeyCondition {
            key: key.to_owned(),
            marker,
            path: resolved.path,
            operators,
            accessor: resolved.accessor,
        });
    }

    Ok(CompiledPredicate { conditions })
}
