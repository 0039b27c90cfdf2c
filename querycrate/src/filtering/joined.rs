//! Traversal into related entities.
//!
//! An owned sub-object is followed transparently: a condition on
//! `customer.city` reads the customer and then its city. A one-to-many
//! collection turns the rest of the path into an existential test: the
//! containing entity matches when at least one element satisfies the
//! condition. Only one collection may be crossed per path.

use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use crate::core::schema::{Filterable, Getter, Schema};
use crate::core::value::{FieldValue, ValueKind};
use crate::errors::{QueryError, Result};

use super::path::PropertyPath;

/// Evaluates an element-level test over a collection reached from `T`.
pub(crate) type Quantifier<T> =
    Arc<dyn Fn(&T, &dyn Fn(&FieldValue) -> bool) -> bool + Send + Sync>;

/// How a resolved leaf is read from the root entity.
pub(crate) enum Accessor<T> {
    /// Exactly one value per entity
    Value(Getter<T>),
    /// Zero or more values behind a collection; the test must hold for any
    Any(Quantifier<T>),
}

/// A resolved leaf: its type tag and how to read it.
pub(crate) struct Leaf<T> {
    pub(crate) kind: ValueKind,
    pub(crate) accessor: Accessor<T>,
}

/// A named edge from `T` to a related entity type.
pub(crate) trait Relation<T>: Send + Sync {
    fn target(&self) -> &'static str;

    fn is_collection(&self) -> bool;

    /// Resolve the remaining segments against the related type and lift the
    /// result back to `T`.
    fn resolve(&self, segments: &[String], path: &mut PropertyPath) -> Result<Leaf<T>>;
}

/// Reads a sub-object out of its parent.
pub(crate) trait ChildAccess<T, U>: Send + Sync + 'static {
    fn child<'a>(&self, entity: &'a T) -> Option<&'a U>;
}

pub(crate) struct Required<F>(pub(crate) F);

pub(crate) struct Optional<F>(pub(crate) F);

impl<T, U, F> ChildAccess<T, U> for Required<F>
where
    F: Fn(&T) -> &U + Send + Sync + 'static,
{
    fn child<'a>(&self, entity: &'a T) -> Option<&'a U> {
        Some((self.0)(entity))
    }
}

impl<T, U, F> ChildAccess<T, U> for Optional<F>
where
    F: Fn(&T) -> Option<&U> + Send + Sync + 'static,
{
    fn child<'a>(&self, entity: &'a T) -> Option<&'a U> {
        (self.0)(entity)
    }
}

pub(crate) struct NestedRelation<T, U, A> {
    access: Arc<A>,
    schema: OnceLock<Schema<U>>,
    _marker: PhantomData<fn(&T)>,
}

impl<T, U, A> NestedRelation<T, U, A> {
    pub(crate) fn new(access: A) -> Self {
        Self {
            access: Arc::new(access),
            schema: OnceLock::new(),
            _marker: PhantomData,
        }
    }
}

impl<T, U, A> Relation<T> for NestedRelation<T, U, A>
where
    T: Filterable,
    U: Filterable,
    A: ChildAccess<T, U>,
{
    fn target(&self) -> &'static str {
        U::ENTITY_NAME
    }

    fn is_collection(&self) -> bool {
        false
    }

    fn resolve(&self, segments: &[String], path: &mut PropertyPath) -> Result<Leaf<T>> {
        let leaf = self.schema.get_or_init(Schema::of).walk(segments, path)?;
        let access = Arc::clone(&self.access);
        let accessor = match leaf.accessor {
            Accessor::Value(inner) => {
                let getter: Getter<T> = Arc::new(move |entity: &T| {
                    access
                        .child(entity)
                        .map_or(FieldValue::Null, |child| inner(child))
                });
                Accessor::Value(getter)
            }
            Accessor::Any(inner) => {
                let quantifier: Quantifier<T> =
                    Arc::new(move |entity: &T, test: &dyn Fn(&FieldValue) -> bool| {
                        access.child(entity).is_some_and(|child| inner(child, test))
                    });
                Accessor::Any(quantifier)
            }
        };
        Ok(Leaf {
            kind: leaf.kind,
            accessor,
        })
    }
}

pub(crate) struct CollectionRelation<T, U, F> {
    items: Arc<F>,
    schema: OnceLock<Schema<U>>,
    _marker: PhantomData<fn(&T)>,
}

impl<T, U, F> CollectionRelation<T, U, F> {
    pub(crate) fn new(items: F) -> Self {
        Self {
            items: Arc::new(items),
            schema: OnceLock::new(),
            _marker: PhantomData,
        }
    }
}

impl<T, U, F> Relation<T> for CollectionRelation<T, U, F>
where
    T: Filterable,
    U: Filterable,
    F: Fn(&T) -> &[U] + Send + Sync + 'static,
{
    fn target(&self) -> &'static str {
        U::ENTITY_NAME
    }

    fn is_collection(&self) -> bool {
        true
    }

    fn resolve(&self, segments: &[String], path: &mut PropertyPath) -> Result<Leaf<T>> {
        if path.crosses_collection() {
            return Err(QueryError::unsupported_path(
                path.to_string(),
                "only one one-to-many relation may be crossed per path",
            ));
        }
        path.mark_collection();
        let leaf = self.schema.get_or_init(Schema::of).walk(segments, path)?;
        quantify(leaf, Arc::clone(&self.items), path)
    }
}

/// Rewrite an element-level leaf into "at least one element of the
/// collection satisfies the test". Evaluation stops at the first match.
fn quantify<T, U, F>(leaf: Leaf<U>, items: Arc<F>, path: &PropertyPath) -> Result<Leaf<T>>
where
    T: 'static,
    U: 'static,
    F: Fn(&T) -> &[U] + Send + Sync + 'static,
{
    let Accessor::Value(inner) = leaf.accessor else {
        return Err(QueryError::unsupported_path(
            path.to_string(),
            "nested collections cannot be quantified",
        ));
    };
    let quantifier: Quantifier<T> =
        Arc::new(move |entity: &T, test: &dyn Fn(&FieldValue) -> bool| {
            items(entity).iter().any(|item| test(&inner(item)))
        });
    Ok(Leaf {
        kind: leaf.kind,
        accessor: Accessor::Any(quantifier),
    })
}
