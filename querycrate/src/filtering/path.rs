//! Property path resolution.
//!
//! A raw key such as `Items_ProductId`, `items.product_id` or
//! `_minRating.Rate` is normalised (range marker stripped, lower-cased, `.`
//! read as `_`), split on `_`, and walked through the entity's field
//! descriptor table. Each step takes the longest run of segments that names
//! a field, so snake_case field names survive the underscore split.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::core::schema::{FieldNode, Filterable, Schema};
use crate::core::value::ValueKind;
use crate::errors::{QueryError, Result};

use super::joined::{Accessor, Leaf};

const MIN_MARKER: &str = "_min";
const MAX_MARKER: &str = "_max";

/// Inclusive bound requested by a `_min` / `_max` key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMarker {
    Min,
    Max,
}

/// Split a leading `_min` / `_max` marker (any case) off a raw key.
#[must_use]
pub fn split_range_marker(raw_key: &str) -> (Option<RangeMarker>, &str) {
    let marker = raw_key.get(..MIN_MARKER.len()).and_then(|prefix| {
        if prefix.eq_ignore_ascii_case(MIN_MARKER) {
            Some(RangeMarker::Min)
        } else if prefix.eq_ignore_ascii_case(MAX_MARKER) {
            Some(RangeMarker::Max)
        } else {
            None
        }
    });
    match marker {
        Some(marker) => (Some(marker), &raw_key[MIN_MARKER.len()..]),
        None => (None, raw_key),
    }
}

/// Normalised, non-empty segments of a raw key with any range marker removed.
#[must_use]
pub fn key_segments(raw_key: &str) -> Vec<String> {
    let (_, key) = split_range_marker(raw_key);
    key.to_lowercase()
        .replace('.', "_")
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

/// The field names walked from the root entity to a leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPath {
    fields: Vec<&'static str>,
    collection: Option<usize>,
}

impl PropertyPath {
    #[must_use]
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Index of the field that is a one-to-many relation, if any. Fields
    /// after it belong to the collection's element type.
    #[must_use]
    pub const fn collection_boundary(&self) -> Option<usize> {
        self.collection
    }

    #[must_use]
    pub const fn crosses_collection(&self) -> bool {
        self.collection.is_some()
    }

    pub(crate) fn push(&mut self, field: &'static str) {
        self.fields.push(field);
    }

    /// Mark the most recently pushed field as the collection boundary.
    pub(crate) fn mark_collection(&mut self) {
        self.collection = self.fields.len().checked_sub(1);
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields.join("."))
    }
}

/// A raw key resolved against an entity type.
pub(crate) struct Resolved<T> {
    pub(crate) path: PropertyPath,
    pub(crate) kind: ValueKind,
    pub(crate) accessor: Accessor<T>,
}

/// Resolve `raw_key` against `schema`.
///
/// # Errors
///
/// `UnknownProperty` when a segment names no field of the type searched at
/// that step; `UnsupportedPath` when the path stops on a relation or crosses
/// more than one collection.
pub(crate) fn resolve<T: Filterable>(schema: &Schema<T>, raw_key: &str) -> Result<Resolved<T>> {
    let segments = key_segments(raw_key);
    if segments.is_empty() {
        return Err(QueryError::unknown_property(raw_key, schema.entity()));
    }

    let mut path = PropertyPath::default();
    let leaf = schema.walk(&segments, &mut path)?;
    trace!(
        entity = schema.entity(),
        key = raw_key,
        path = %path,
        kind = %leaf.kind,
        "resolved property path"
    );
    Ok(Resolved {
        path,
        kind: leaf.kind,
        accessor: leaf.accessor,
    })
}

impl<T> Schema<T> {
    /// Walk `segments` through this table, recording visited fields in `path`.
    pub(crate) fn walk(&self, segments: &[String], path: &mut PropertyPath) -> Result<Leaf<T>> {
        let Some(first) = segments.first() else {
            return Err(QueryError::unsupported_path(
                path.to_string(),
                format!("'{path}' is a relation; name one of its fields"),
            ));
        };

        let (consumed, field) = (1..=segments.len())
            .rev()
            .find_map(|take| {
                self.lookup(&segments[..take].concat())
                    .map(|field| (take, field))
            })
            .ok_or_else(|| QueryError::unknown_property(first.as_str(), self.entity()))?;

        path.push(field.name());
        let rest = &segments[consumed..];

        match &field.node {
            FieldNode::Scalar { kind, get } => {
                if let Some(next) = rest.first() {
                    return Err(QueryError::unknown_property(
                        next.as_str(),
                        format!("{path} ({kind})"),
                    ));
                }
                Ok(Leaf {
                    kind: *kind,
                    accessor: Accessor::Value(Arc::clone(get)),
                })
            }
            FieldNode::Relation(relation) => relation.resolve(rest, path),
        }
    }
}
