//! Input size caps applied while compiling a query.
//!
//! Exceeding any of these fails with [`QueryError::LimitExceeded`]; nothing is
//! ever silently truncated.

use serde::{Deserialize, Serialize};

use crate::errors::{QueryError, Result};

/// Longest single filter value accepted by default.
const MAX_FIELD_VALUE_LENGTH: usize = 10_000;

/// Bounds on filter maps, order-by strings and page sizes.
///
/// Deserialisable from configuration; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
    /// Maximum number of keys in one filter map (default: 32)
    pub max_filter_keys: usize,
    /// Maximum number of values under one key (default: 100)
    pub max_values_per_key: usize,
    /// Maximum length of a single value in bytes (default: 10 000)
    pub max_value_length: usize,
    /// Maximum number of comma-separated sort segments (default: 8)
    pub max_sort_fields: usize,
    /// Page size used when a list query names none (default: 10)
    pub default_page_size: usize,
    /// Largest page size a list query may request (default: 100)
    pub max_page_size: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_filter_keys: 32,
            max_values_per_key: 100,
            max_value_length: MAX_FIELD_VALUE_LENGTH,
            max_sort_fields: 8,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl QueryLimits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_max_filter_keys(mut self, max: usize) -> Self {
        self.max_filter_keys = max;
        self
    }

    #[must_use]
    pub const fn with_max_values_per_key(mut self, max: usize) -> Self {
        self.max_values_per_key = max;
        self
    }

    #[must_use]
    pub const fn with_max_value_length(mut self, max: usize) -> Self {
        self.max_value_length = max;
        self
    }

    #[must_use]
    pub const fn with_max_sort_fields(mut self, max: usize) -> Self {
        self.max_sort_fields = max;
        self
    }

    /// Set the default page size; it is clamped to `max_page_size` when used.
    #[must_use]
    pub const fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    #[must_use]
    pub const fn with_max_page_size(mut self, max: usize) -> Self {
        self.max_page_size = max;
        self
    }

    /// # Errors
    ///
    /// `LimitExceeded` when the map has too many keys.
    pub fn validate_filter_keys(&self, count: usize) -> Result<()> {
        check("filter keys", count, self.max_filter_keys)
    }

    /// # Errors
    ///
    /// `LimitExceeded` when a key carries too many values or one of them is
    /// too long.
    pub fn validate_values(&self, values: &[String]) -> Result<()> {
        check("values per key", values.len(), self.max_values_per_key)?;
        values
            .iter()
            .try_for_each(|value| check("filter value length", value.len(), self.max_value_length))
    }

    /// # Errors
    ///
    /// `LimitExceeded` when the order-by string names too many fields.
    pub fn validate_sort_fields(&self, count: usize) -> Result<()> {
        check("sort fields", count, self.max_sort_fields)
    }

    /// # Errors
    ///
    /// `LimitExceeded` when the requested page size is above `max_page_size`.
    pub fn validate_page_size(&self, size: usize) -> Result<()> {
        check("page size", size, self.max_page_size)
    }

    /// The default page size, never larger than the maximum.
    #[must_use]
    pub fn page_size_or_default(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or_else(|| self.default_page_size.min(self.max_page_size))
    }
}

fn check(what: &'static str, actual: usize, limit: usize) -> Result<()> {
    if actual > limit {
        return Err(QueryError::LimitExceeded { what, limit });
    }
    Ok(())
}
