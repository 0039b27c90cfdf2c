//! The filter/sort facade.
//!
//! [`QueryCompiler`] owns the descriptor table of one entity type and the
//! active [`QueryLimits`]. Compilation is a pure function of its inputs, so
//! one compiler can be shared across threads and reused for every request.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::core::schema::{Filterable, Schema};
use crate::errors::Result;
use crate::models::{FilterMap, ListQuery};
use crate::pagination::PaginatedList;

use super::conditions::{CompiledPredicate, compile_filter};
use super::limits::QueryLimits;
use super::sort::{CompiledComparator, SortToken, compile_sort, parse_order_by};

pub struct QueryCompiler<T> {
    schema: Schema<T>,
    limits: QueryLimits,
}

impl<T: Filterable> QueryCompiler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(QueryLimits::default())
    }

    #[must_use]
    pub fn with_limits(limits: QueryLimits) -> Self {
        Self {
            schema: Schema::of(),
            limits,
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema<T> {
        &self.schema
    }

    #[must_use]
    pub const fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    /// # Errors
    ///
    /// See [`compile_filter`].
    pub fn compile_filter(&self, filters: &FilterMap) -> Result<CompiledPredicate<T>> {
        compile_filter(&self.schema, filters, &self.limits).inspect_err(|err| {
            debug!(entity = self.schema.entity(), error = %err, "rejected filter");
        })
    }

    /// Compile an order-by string. An empty (or all-blank) string sorts by
    /// the entity's identity field, ascending.
    ///
    /// # Errors
    ///
    /// See [`compile_sort`].
    pub fn compile_sort(&self, order_by: &str) -> Result<CompiledComparator<T>> {
        let mut tokens = parse_order_by(order_by);
        if tokens.is_empty() {
            tokens.push(SortToken::ascending(self.schema.identity()));
        }
        compile_sort(&self.schema, &tokens, &self.limits).inspect_err(|err| {
            debug!(entity = self.schema.entity(), order_by, error = %err, "rejected sort");
        })
    }

    /// Compile both halves of a query.
    ///
    /// # Errors
    ///
    /// The first error from either half; the filter is compiled first.
    pub fn compile(&self, filters: &FilterMap, order_by: &str) -> Result<CompiledQuery<T>> {
        Ok(CompiledQuery {
            predicate: self.compile_filter(filters)?,
            comparator: self.compile_sort(order_by)?,
        })
    }

    /// # Errors
    ///
    /// See [`QueryCompiler::compile`].
    pub fn compile_list(&self, query: &ListQuery) -> Result<CompiledQuery<T>> {
        self.compile(&query.filters, &query.order)
    }
}

impl<T: Filterable> Default for QueryCompiler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for QueryCompiler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCompiler")
            .field("schema", &self.schema)
            .field("limits", &self.limits)
            .finish()
    }
}

/// A compiled predicate and comparator pair.
pub struct CompiledQuery<T> {
    predicate: CompiledPredicate<T>,
    comparator: CompiledComparator<T>,
}

impl<T> CompiledQuery<T> {
    #[must_use]
    pub fn matches(&self, entity: &T) -> bool {
        self.predicate.matches(entity)
    }

    #[must_use]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        self.comparator.compare(a, b)
    }

    #[must_use]
    pub const fn predicate(&self) -> &CompiledPredicate<T> {
        &self.predicate
    }

    #[must_use]
    pub const fn comparator(&self) -> &CompiledComparator<T> {
        &self.comparator
    }

    #[must_use]
    pub fn into_parts(self) -> (CompiledPredicate<T>, CompiledComparator<T>) {
        (self.predicate, self.comparator)
    }

    /// Keep the matching items and sort them. The sort is stable.
    #[must_use]
    pub fn apply<I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut selected: Vec<T> = items.into_iter().filter(|item| self.matches(item)).collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }

    /// Like [`apply`](Self::apply), over borrowed items.
    #[must_use]
    pub fn select<'a, I>(&self, items: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut selected: Vec<&T> = items.into_iter().filter(|item| self.matches(item)).collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }

    /// Apply the query, then cut out one page.
    #[must_use]
    pub fn page<I>(&self, items: I, page: usize, size: usize) -> PaginatedList<T>
    where
        I: IntoIterator<Item = T>,
    {
        PaginatedList::paginate(self.apply(items), page, size)
    }
}

impl<T> fmt::Debug for CompiledQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledQuery")
            .field("predicate", &self.predicate)
            .field("comparator", &self.comparator)
            .finish()
    }
}

/// Compile a query for `T` with default limits.
///
/// Builds the descriptor table on every call; hold a [`QueryCompiler`] to
/// reuse it.
///
/// # Errors
///
/// See [`QueryCompiler::compile`].
pub fn compile<T: Filterable>(filters: &FilterMap, order_by: &str) -> Result<CompiledQuery<T>> {
    QueryCompiler::new().compile(filters, order_by)
}
