//! Order-by parsing and comparator compilation.
//!
//! The order-by format is `"field [asc|desc], field [asc|desc], ..."`. A
//! direction other than `desc` (any case), or none at all, means ascending.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::schema::{Filterable, Getter, Schema};
use crate::errors::{QueryError, Result};

use super::joined::Accessor;
use super::limits::QueryLimits;
use super::path::{PropertyPath, resolve};

const DESCENDING: &str = "desc";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case is descending; everything else is ascending.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        if token.eq_ignore_ascii_case(DESCENDING) {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// One comma-separated segment of an order-by string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortToken {
    pub path: String,
    pub direction: SortDirection,
}

impl SortToken {
    #[must_use]
    pub fn ascending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn descending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Split an order-by string into tokens, skipping empty segments.
///
/// Words after the direction are ignored: `"price desc nulls"` sorts by
/// price, descending.
#[must_use]
pub fn parse_order_by(order_by: &str) -> Vec<SortToken> {
    order_by
        .split(',')
        .filter_map(|segment| {
            let mut words = segment.split_whitespace();
            let path = words.next()?;
            let direction = words.next().map(SortDirection::parse).unwrap_or_default();
            Some(SortToken {
                path: path.to_owned(),
                direction,
            })
        })
        .collect()
}

struct SortKey<T> {
    path: PropertyPath,
    direction: SortDirection,
    get: Getter<T>,
}

/// Multi-key comparator: keys are applied left to right and the first
/// non-equal comparison decides.
pub struct CompiledComparator<T> {
    keys: Vec<SortKey<T>>,
}

impl<T> CompiledComparator<T> {
    #[must_use]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        self.keys
            .iter()
            .map(|key| key.direction.apply((key.get)(a).sort_cmp(&(key.get)(b))))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Resolved paths and directions, in precedence order
    pub fn keys(&self) -> impl Iterator<Item = (&PropertyPath, SortDirection)> {
        self.keys.iter().map(|key| (&key.path, key.direction))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<T> fmt::Debug for CompiledComparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.keys
                    .iter()
                    .map(|key| format!("{} {}", key.path, key.direction)),
            )
            .finish()
    }
}

/// Resolve every token against `schema`.
///
/// An empty token list yields a comparator that treats all entities as equal;
/// the identity default is applied by [`QueryCompiler`](super::QueryCompiler).
///
/// # Errors
///
/// `UnknownProperty` for a path that does not resolve, `UnsupportedPath` for
/// one that crosses a collection, `LimitExceeded` for too many tokens.
pub fn compile_sort<T: Filterable>(
    schema: &Schema<T>,
    tokens: &[SortToken],
    limits: &QueryLimits,
) -> Result<CompiledComparator<T>> {
    limits.validate_sort_fields(tokens.len())?;

    let keys = tokens
        .iter()
        .map(|token| {
            let resolved = resolve(schema, &token.path)?;
            let Accessor::Value(get) = resolved.accessor else {
                return Err(QueryError::unsupported_path(
                    resolved.path.to_string(),
                    "sorting across a one-to-many relation is not supported",
                ));
            };
            debug!(
                entity = schema.entity(),
                path = %resolved.path,
                direction = %token.direction,
                "compiled sort key"
            );
            Ok(SortKey {
                path: resolved.path,
                direction: token.direction,
                get,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CompiledComparator { keys })
}
