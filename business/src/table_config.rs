use crate::SortKey;

pub const DEFAULT_ROWS_PER_PAGE: u32 = 10;
pub const DEFAULT_TOTAL_PAGES: u32 = 10;

/// Most users one request may ask for; randomuser caps `results` at 5000.
pub const MAX_FETCH_SIZE: u64 = 5000;

/// Display configuration of the users table.
///
/// `page` is 1-based and never exceeds `total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub page: u32,
    pub rows_per_page: u32,
    pub total_pages: u32,
    pub sort: SortKey,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            total_pages: DEFAULT_TOTAL_PAGES,
            sort: SortKey::default(),
        }
    }
}

impl TableConfig {
    /// Number of users to request: `rows_per_page * total_pages`.
    pub fn fetch_size(&self) -> u64 {
        u64::from(self.rows_per_page) * u64::from(self.total_pages)
    }

    /// Fetch size a re-initialize to `rows_per_page` / `total_users` would request.
    pub fn fetch_size_for(total_users: u32, rows_per_page: u32) -> u64 {
        u64::from(rows_per_page) * u64::from(total_pages_for(total_users, rows_per_page))
    }

    pub fn contains_page(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    /// Rows of `users` shown on the current page.
    pub fn window<'a, T>(&self, users: &'a [T]) -> &'a [T] {
        page_window(users, self.page, self.rows_per_page)
    }
}

/// `ceil(total_users / rows_per_page)`. Both inputs must be positive.
pub fn total_pages_for(total_users: u32, rows_per_page: u32) -> u32 {
    total_users.div_ceil(rows_per_page)
}

/// `items[(page-1)*rows .. page*rows]`, truncated to what exists.
///
/// Pages past the end yield an empty slice instead of panicking.
pub fn page_window<T>(items: &[T], page: u32, rows_per_page: u32) -> &[T] {
    let rows = rows_per_page as usize;
    let start = (page.saturating_sub(1) as usize)
        .saturating_mul(rows)
        .min(items.len());
    let end = start.saturating_add(rows).min(items.len());
    items.get(start..end).unwrap_or_default()
}

/// Parse a strictly positive integer from a text input.
///
/// Empty, zero, negative, fractional and non-numeric input is rejected.
pub fn parse_positive(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|value| *value > 0)
}
