use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{QueryError, Result};
use crate::filtering::QueryLimits;

const PAGE_KEY: &str = "_page";
const SIZE_KEY: &str = "_size";
const ORDER_KEY: &str = "_order";

/// Filter criteria: property key to the list of accepted values.
///
/// Values under one key are OR-combined; keys are AND-combined. A key may
/// carry a `_min` / `_max` prefix for inclusive ranges, and text values may
/// carry `*` wildcards:
///
/// ```json
/// {
///   "category": ["Beer", "Wine"],
///   "title": "*lager*",
///   "_minPrice": "10",
///   "items_productId": "5"
/// }
/// ```
///
/// A single string is accepted wherever a list is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterMap(BTreeMap<String, Vec<String>>);

impl FilterMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with<K, I, V>(mut self, key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.insert(key, values);
        self
    }

    /// Replace the values under `key`, returning the previous ones.
    pub fn insert<K, I, V>(&mut self, key: K, values: I) -> Option<Vec<String>>
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.0
            .insert(key.into(), values.into_iter().map(Into::into).collect())
    }

    /// Append one value under `key`.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

/// Repeated keys accumulate their values.
impl<K, I, V> Extend<(K, I)> for FilterMap
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, I)>>(&mut self, entries: T) {
        for (key, values) in entries {
            let values = values.into_iter().map(Into::into);
            match self.0.entry(key.into()) {
                Entry::Occupied(mut existing) => existing.get_mut().extend(values),
                Entry::Vacant(slot) => {
                    slot.insert(values.collect());
                }
            }
        }
    }
}

impl<K, I, V> FromIterator<(K, I)> for FilterMap
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(entries: T) -> Self {
        let mut map = Self::new();
        map.extend(entries);
        map
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for FilterMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, OneOrMany>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(key, values)| match values {
                    OneOrMany::One(value) => (key, vec![value]),
                    OneOrMany::Many(values) => (key, values),
                })
                .collect(),
        ))
    }
}

/// A list request: filters, order-by string and page window.
///
/// Parsed from a URL query string where every key except the reserved
/// `_page`, `_size` and `_order` (any case) is a filter key. Repeating a key
/// adds another accepted value:
///
/// ```text
/// ?category=Beer&category=Wine&_minPrice=10&_order=price%20desc&_page=2&_size=20
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: usize,
    pub size: usize,
    /// Raw order-by string; empty means the identity default
    pub order: String,
    pub filters: FilterMap,
}

impl ListQuery {
    /// Parse a URL query string, with or without its leading `?`.
    ///
    /// # Errors
    ///
    /// `InvalidPagination` for a page or size that is not a positive integer,
    /// `LimitExceeded` for a size above `limits.max_page_size`.
    pub fn parse(query: &str, limits: &QueryLimits) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()), limits)
    }

    /// Build from already decoded key/value pairs.
    ///
    /// # Errors
    ///
    /// See [`ListQuery::parse`].
    pub fn from_pairs<I, K, V>(pairs: I, limits: &QueryLimits) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str> + Into<String>,
        V: AsRef<str> + Into<String>,
    {
        let mut page = None;
        let mut size = None;
        let mut order = String::new();
        let mut filters = FilterMap::new();

        for (key, value) in pairs {
            let name = key.as_ref();
            if name.eq_ignore_ascii_case(PAGE_KEY) {
                page = Some(parse_positive(PAGE_KEY, value.as_ref())?);
            } else if name.eq_ignore_ascii_case(SIZE_KEY) {
                size = Some(parse_positive(SIZE_KEY, value.as_ref())?);
            } else if name.eq_ignore_ascii_case(ORDER_KEY) {
                order = value.into();
            } else {
                filters.push(key, value);
            }
        }

        if let Some(size) = size {
            limits.validate_page_size(size)?;
        }

        Ok(Self {
            page: page.unwrap_or(1),
            size: limits.page_size_or_default(size),
            order,
            filters,
        })
    }

    /// Number of items skipped before this page
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }
}

fn parse_positive(parameter: &'static str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|number| *number > 0)
        .ok_or_else(|| QueryError::InvalidPagination {
            parameter,
            value: value.to_owned(),
        })
}
