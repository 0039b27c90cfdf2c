//! # querycrate
//!
//! Turn an untyped, string-keyed filter map and an `"field [asc|desc], ..."`
//! order-by string into a typed predicate and a multi-key comparator over any
//! entity that registers a field descriptor table.
//!
//! ```rust,ignore
//! use querycrate::{FilterEnum, FilterMap, Filterable, QueryCompiler};
//!
//! #[derive(FilterEnum)]
//! pub enum Status { Active, Discontinued }
//!
//! #[derive(Filterable)]
//! pub struct Product {
//!     pub id: i32,
//!     pub title: String,
//!     pub price: rust_decimal::Decimal,
//!     pub status: Status,
//! }
//!
//! let compiler = QueryCompiler::<Product>::new();
//! let filters = FilterMap::new()
//!     .with("title", ["*lar*"])
//!     .with("_minPrice", ["10"]);
//! let query = compiler.compile(&filters, "price desc, title")?;
//! let visible = query.select(&products);
//! ```

pub mod core;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod pagination;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::core::schema::{FieldDef, Filterable, Schema, SchemaBuilder};
pub use crate::core::value::{EnumMember, FieldValue, FilterValue, ValueKind};
pub use errors::{QueryError, Result};
pub use filtering::{
    CompiledComparator, CompiledPredicate, CompiledQuery, FilterOperator, PropertyPath,
    QueryCompiler, QueryLimits, SortDirection, SortToken, compile,
};
pub use models::{FilterMap, ListQuery};
pub use pagination::PaginatedList;

#[cfg(feature = "derive")]
pub use querycrate_derive::{FilterEnum, Filterable};

/// Implement [`FilterValue`] for a fieldless enum by listing its variants in
/// declaration order.
///
/// Usage: `filter_enum!(SaleStatus { Active, Cancelled })`;
#[macro_export]
macro_rules! filter_enum {
    ($enum_type:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::FilterValue for $enum_type {
            fn kind() -> $crate::ValueKind {
                $crate::ValueKind::Enum {
                    name: stringify!($enum_type),
                    members: &[$(stringify!($variant)),+],
                }
            }

            fn to_field_value(&self) -> $crate::FieldValue {
                let names: &'static [&'static str] = &[$(stringify!($variant)),+];
                let index = [$(matches!(self, Self::$variant)),+]
                    .iter()
                    .position(|matched| *matched)
                    .unwrap_or_default();
                $crate::FieldValue::Enum($crate::EnumMember {
                    index,
                    name: names[index],
                })
            }
        }
    };
}
