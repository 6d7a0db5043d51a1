use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Rows-per-page choices offered by the table footer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageLimit {
    #[default]
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl PageLimit {
    pub const ALL: [PageLimit; 4] = [
        PageLimit::Ten,
        PageLimit::Twenty,
        PageLimit::Fifty,
        PageLimit::Hundred,
    ];

    pub const fn get(self) -> u32 {
        match self {
            PageLimit::Ten => 10,
            PageLimit::Twenty => 20,
            PageLimit::Fifty => 50,
            PageLimit::Hundred => 100,
        }
    }
}

impl TryFrom<u32> for PageLimit {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|limit| limit.get() == value)
            .ok_or(TypeConstraintError::InvalidPageLimit(value))
    }
}

impl From<PageLimit> for u32 {
    fn from(value: PageLimit) -> Self {
        value.get()
    }
}

/// Where the page count of a list response comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagesSource {
    /// The collaborator returns `page` and `pages`; both are trusted verbatim.
    Server,
    /// Only `total` is returned; `pages` is derived from `total` and `limit`.
    Local,
}

/// Pagination block as returned by the collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ServerPagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Number of pages needed for `total` rows, never less than one.
pub fn local_page_count(total: u64, limit: PageLimit) -> u32 {
    let pages = total.div_ceil(u64::from(limit.get())).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// `{ total, page, pages, limit }` of one list page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    total: u64,
    page: u32,
    pages: u32,
    limit: PageLimit,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            pages: 1,
            limit: PageLimit::default(),
        }
    }
}

impl PaginationState {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn limit(&self) -> PageLimit {
        self.limit
    }

    /// Moves to page `n` when `1 <= n <= pages`; returns whether it was accepted.
    pub fn set_page(&mut self, n: u32) -> bool {
        if n < 1 || n > self.pages {
            return false;
        }
        self.page = n;
        true
    }

    /// Changes the page size and always goes back to the first page.
    pub fn set_limit(&mut self, limit: PageLimit) {
        self.limit = limit;
        self.page = 1;
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Overwrites the window with what the collaborator reported.
    pub fn replace_from_server(&mut self, result: &ServerPagination, source: PagesSource) {
        self.total = result.total;
        match source {
            PagesSource::Server => {
                if let Some(page) = result.page {
                    self.page = page;
                }
                if let Some(pages) = result.pages {
                    self.pages = pages;
                }
            }
            PagesSource::Local => {
                self.pages = local_page_count(result.total, self.limit);
            }
        }
    }

    /// Running number of the row at `index` on the current page.
    pub fn row_number(&self, index: usize) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit.get()) + index as u64 + 1
    }
}

/// Page links around the current page; `None` marks an ellipsis gap.
pub fn page_window(
    total_pages: u32,
    current_page: u32,
    left_edge: u32,
    left_current: u32,
    right_current: u32,
    right_edge: u32,
) -> Vec<Option<u32>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = left_edge.saturating_add(1).min(last_page.saturating_add(1));
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page.saturating_add(1));

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge).saturating_add(1));

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}
