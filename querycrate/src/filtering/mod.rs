//! # Filter & Sort Compilation
//!
//! Turns a [`FilterMap`](crate::FilterMap) and an order-by string into a
//! [`CompiledPredicate`] and a [`CompiledComparator`] for one entity type.
//!
//! ## Filter keys
//!
//! ```text
//! title=Lager              case-insensitive equality on a text field
//! title=*lar*              contains      (*lar = ends with, lar* = starts with)
//! _minPrice=10             price >= 10
//! _maxPrice=50             price <= 50
//! status=active            enum member, matched case-insensitively
//! rating.rate=4            field of an owned sub-object (rating_rate works too)
//! items_productId=5        at least one cart item has product 5
//! ```
//!
//! Several values under one key are OR-combined; keys are AND-combined. Only
//! one one-to-many relation may be crossed per key, and sort keys may not
//! cross any.
//!
//! ## Main Components
//!
//! - [`QueryCompiler`]: per-entity facade holding the descriptor table and limits
//! - [`compile_filter`] / [`compile_sort`]: the two compilation stages
//! - [`QueryLimits`]: input size caps

pub mod coercion;
pub mod compiler;
pub mod conditions;
pub(crate) mod joined;
pub mod limits;
pub mod path;
pub mod sort;

pub use coercion::{Wildcard, coerce, strip_wildcards};
pub use compiler::{CompiledQuery, QueryCompiler, compile};
pub use conditions::{CompiledPredicate, FilterOperator, KeyCondition, compile_filter};
pub use limits::QueryLimits;
pub use path::{PropertyPath, RangeMarker, key_segments, split_range_marker};
pub use sort::{CompiledComparator, SortDirection, SortToken, compile_sort, parse_order_by};
