use serde::Serialize;

/// One page of an already filtered and sorted result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedList<T> {
    pub data: Vec<T>,
    /// Items matching the filter across all pages
    pub total_count: usize,
    /// 1-based
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> PaginatedList<T> {
    /// Cut page `page` (1-based) of `size` items out of `items`.
    ///
    /// A page past the end is empty but still reports the totals. Zero page
    /// numbers and sizes are read as one.
    #[must_use]
    pub fn paginate<I>(items: I, page: usize, size: usize) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let page = page.max(1);
        let size = size.max(1);
        let items: Vec<T> = items.into_iter().collect();
        let total_count = items.len();
        let data = items
            .into_iter()
            .skip((page - 1).saturating_mul(size))
            .take(size)
            .collect();

        Self {
            data,
            total_count,
            current_page: page,
            page_size: size,
            total_pages: total_count.div_ceil(size),
        }
    }

    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Convert the items of this page, keeping the totals.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> PaginatedList<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedList {
            data: self.data.into_iter().map(f).collect(),
            total_count: self.total_count,
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
