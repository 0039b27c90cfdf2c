//! # Field Descriptor Tables
//!
//! Every filterable entity registers a table of named fields once, through
//! [`Filterable::describe`]. Each entry is either a leaf (a getter plus a
//! [`ValueKind`] tag), an owned sub-object, or a one-to-many collection.
//! Path resolution is a lookup in these tables; there is no runtime
//! reflection.
//!
//! ```rust,ignore
//! impl Filterable for Cart {
//!     const ENTITY_NAME: &'static str = "Cart";
//!
//!     fn describe(schema: &mut SchemaBuilder<Self>) {
//!         schema
//!             .field("id", |cart: &Self| &cart.id)
//!             .field("user_id", |cart: &Self| &cart.user_id)
//!             .collection("items", |cart: &Self| cart.items.as_slice());
//!     }
//! }
//! ```
//!
//! `#[derive(Filterable)]` generates exactly this registration.

use std::fmt;
use std::sync::Arc;

use super::value::{FieldValue, FilterValue, ValueKind};
use crate::filtering::joined::{CollectionRelation, NestedRelation, Optional, Relation, Required};

pub(crate) type Getter<T> = Arc<dyn Fn(&T) -> FieldValue + Send + Sync>;

/// An entity type whose fields can be filtered and sorted by name.
pub trait Filterable: Sized + Send + Sync + 'static {
    /// Name used in error messages, e.g. `"Product"`
    const ENTITY_NAME: &'static str;

    /// Field sorted on (ascending) when the order-by string is empty
    const IDENTITY: &'static str = "id";

    fn describe(schema: &mut SchemaBuilder<Self>);
}

pub(crate) enum FieldNode<T> {
    Scalar { kind: ValueKind, get: Getter<T> },
    Relation(Arc<dyn Relation<T>>),
}

/// One named entry of a field descriptor table.
pub struct FieldDef<T> {
    name: &'static str,
    normalized: String,
    pub(crate) node: FieldNode<T>,
}

impl<T> FieldDef<T> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Leaf type tag, `None` for relations
    #[must_use]
    pub fn kind(&self) -> Option<ValueKind> {
        match &self.node {
            FieldNode::Scalar { kind, .. } => Some(*kind),
            FieldNode::Relation(_) => None,
        }
    }

    #[must_use]
    pub fn is_collection(&self) -> bool {
        matches!(&self.node, FieldNode::Relation(relation) if relation.is_collection())
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        matches!(&self.node, FieldNode::Relation(relation) if !relation.is_collection())
    }

    /// Entity name of the related type, `None` for leaves
    #[must_use]
    pub fn target(&self) -> Option<&'static str> {
        match &self.node {
            FieldNode::Scalar { .. } => None,
            FieldNode::Relation(relation) => Some(relation.target()),
        }
    }
}

impl<T> fmt::Debug for FieldDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("FieldDef");
        out.field("name", &self.name);
        match &self.node {
            FieldNode::Scalar { kind, .. } => out.field("kind", kind),
            FieldNode::Relation(relation) => out
                .field("target", &relation.target())
                .field("collection", &relation.is_collection()),
        };
        out.finish()
    }
}

/// Lower-cases and drops `_` so `product_id`, `ProductId` and `productid`
/// compare equal.
pub(crate) fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// The built field descriptor table of one entity type.
pub struct Schema<T> {
    entity: &'static str,
    identity: &'static str,
    fields: Vec<FieldDef<T>>,
}

impl<T: Filterable> Schema<T> {
    /// Build the table by running `T::describe`.
    ///
    /// Related schemas are built lazily on first traversal.
    #[must_use]
    pub fn of() -> Self {
        let mut builder = SchemaBuilder {
            fields: Vec::new(),
        };
        T::describe(&mut builder);
        Self {
            entity: T::ENTITY_NAME,
            identity: T::IDENTITY,
            fields: builder.fields,
        }
    }
}

impl<T> Schema<T> {
    #[must_use]
    pub const fn entity(&self) -> &'static str {
        self.entity
    }

    #[must_use]
    pub const fn identity(&self) -> &'static str {
        self.identity
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDef<T>> {
        self.fields.iter()
    }

    /// Case-insensitive lookup by registered name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef<T>> {
        self.lookup(&normalize_name(name))
    }

    pub(crate) fn lookup(&self, normalized: &str) -> Option<&FieldDef<T>> {
        self.fields.iter().find(|field| field.normalized == normalized)
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("entity", &self.entity)
            .field("identity", &self.identity)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Registration API handed to [`Filterable::describe`].
pub struct SchemaBuilder<T> {
    fields: Vec<FieldDef<T>>,
}

impl<T: Filterable> SchemaBuilder<T> {
    /// Register a leaf field.
    pub fn field<V, F>(&mut self, name: &'static str, get: F) -> &mut Self
    where
        V: FilterValue + 'static,
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        let getter: Getter<T> = Arc::new(move |entity: &T| get(entity).to_field_value());
        self.push(
            name,
            FieldNode::Scalar {
                kind: V::kind(),
                get: getter,
            },
        )
    }

    /// Register an owned sub-object whose fields are reachable as
    /// `name.field` or `name_field`.
    pub fn nested<U, F>(&mut self, name: &'static str, get: F) -> &mut Self
    where
        U: Filterable,
        F: Fn(&T) -> &U + Send + Sync + 'static,
    {
        let relation: NestedRelation<T, U, _> = NestedRelation::new(Required(get));
        self.push(name, FieldNode::Relation(Arc::new(relation)))
    }

    /// Register an optional sub-object; a missing one satisfies no condition.
    pub fn nested_optional<U, F>(&mut self, name: &'static str, get: F) -> &mut Self
    where
        U: Filterable,
        F: Fn(&T) -> Option<&U> + Send + Sync + 'static,
    {
        let relation: NestedRelation<T, U, _> = NestedRelation::new(Optional(get));
        self.push(name, FieldNode::Relation(Arc::new(relation)))
    }

    /// Register a one-to-many collection. Filters on its element fields
    /// match when at least one element satisfies them.
    pub fn collection<U, F>(&mut self, name: &'static str, get: F) -> &mut Self
    where
        U: Filterable,
        F: Fn(&T) -> &[U] + Send + Sync + 'static,
    {
        let relation: CollectionRelation<T, U, F> = CollectionRelation::new(get);
        self.push(name, FieldNode::Relation(Arc::new(relation)))
    }

    fn push(&mut self, name: &'static str, node: FieldNode<T>) -> &mut Self {
        let normalized = normalize_name(name);
        // Re-registering a name replaces the earlier entry
        self.fields.retain(|field| field.normalized != normalized);
        self.fields.push(FieldDef {
            name,
            normalized,
            node,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Category, Order, OrderLine};

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("product_id"), "productid");
        assert_eq!(normalize_name("ProductId"), "productid");
        assert_eq!(normalize_name("PRODUCTID"), "productid");
    }

    #[test]
    fn test_schema_describes_leaves_and_relations() {
        let schema = Schema::<Order>::of();
        assert_eq!(schema.entity(), "Order");
        assert_eq!(schema.identity(), "id");

        let total = schema.field("Total").expect("total is registered");
        assert_eq!(total.kind(), Some(ValueKind::Decimal));
        assert!(!total.is_collection());

        let lines = schema.field("lines").expect("lines is registered");
        assert!(lines.is_collection());
        assert_eq!(lines.kind(), None);
        assert_eq!(lines.target(), Some("OrderLine"));

        let customer = schema.field("customer").expect("customer is registered");
        assert!(customer.is_nested());
    }

    #[test]
    fn test_lookup_ignores_case_and_underscores() {
        let schema = Schema::<OrderLine>::of();
        assert!(schema.field("ProductId").is_some());
        assert!(schema.field("product_id").is_some());
        assert!(schema.field("colour").is_none());
    }

    #[test]
    fn test_self_referential_schema_builds() {
        let schema = Schema::<Category>::of();
        assert!(schema.field("children").is_some_and(FieldDef::is_collection));
        assert!(schema.field("parent").is_some_and(FieldDef::is_nested));
    }
}
