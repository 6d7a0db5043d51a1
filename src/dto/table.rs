//! Presentational table contract shared by the four list pages.
//!
//! [`TableView::build`] is a pure function of the list state; the view never
//! mutates anything itself. User input on the table comes back out as
//! [`TableAction`] values for the page service to handle.

use serde::Serialize;

use crate::domain::types::EntityStatus;
use crate::listing::pagination::page_window;
use crate::listing::{FilterSet, ListController, PageLimit, PaginationState};

/// Row interaction or pager change requested from the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableAction<K> {
    Edit(K),
    /// Deletion the user already confirmed.
    Delete(K),
    ChangeStatus(K, EntityStatus),
    SetDefault(K),
    ToggleActive(K, bool),
    GoToPage(u32),
    ChangeLimit(PageLimit),
}

/// Inline status control of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusControl {
    /// Two-way `ACTIVE`/`INACTIVE` toggle.
    Status { current: EntityStatus },
    /// `isActive` switch of suggested questions.
    Switch { active: bool },
}

/// Per-row controls besides the plain cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowControls {
    pub status: Option<StatusControl>,
    /// `Some(true)` shows the default badge, `Some(false)` the "set default" button.
    pub default: Option<bool>,
    pub delete_enabled: bool,
    pub delete_title: &'static str,
}

impl Default for RowControls {
    fn default() -> Self {
        Self {
            status: None,
            default: None,
            delete_enabled: true,
            delete_title: "삭제",
        }
    }
}

/// Entity shown as one table row.
pub trait TableRecord {
    type Key: Clone + Serialize;

    const COLUMNS: &'static [&'static str];
    const EMPTY_MESSAGE: &'static str;
    /// Noun used in the "총 N개의 ..." summary.
    const NOUN: &'static str;

    fn key(&self) -> Self::Key;
    fn cells(&self) -> Vec<String>;
    fn controls(&self) -> RowControls;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableRow<K> {
    /// Running number across pages, starting at 1.
    pub number: u64,
    pub key: K,
    pub cells: Vec<String>,
    pub controls: RowControls,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableBody<K> {
    /// Placeholder rows while a request is in flight.
    Skeleton { rows: u32 },
    Empty { message: &'static str },
    Rows { rows: Vec<TableRow<K>> },
}

/// Footer of the table: page size picker, summary and pager.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    pub limit: u32,
    pub limit_options: Vec<u32>,
    pub summary: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    /// Page links; `None` marks a gap.
    pub window: Vec<Option<u32>>,
}

impl PaginationControls {
    pub fn new(pagination: &PaginationState, noun: &str) -> Self {
        let page = pagination.page();
        let pages = pagination.pages();
        Self {
            page,
            pages,
            total: pagination.total(),
            limit: pagination.limit().get(),
            limit_options: PageLimit::ALL.iter().map(|limit| limit.get()).collect(),
            summary: format!("총 {}개의 {noun}", pagination.total()),
            previous_enabled: page > 1,
            next_enabled: page < pages,
            window: page_window(pages, page, 2, 2, 4, 2),
        }
    }

    pub fn previous<K>(&self) -> Option<TableAction<K>> {
        self.previous_enabled
            .then(|| TableAction::GoToPage(self.page - 1))
    }

    pub fn next<K>(&self) -> Option<TableAction<K>> {
        self.next_enabled.then(|| TableAction::GoToPage(self.page + 1))
    }

    /// Page typed into the page box; non-numeric or out-of-range input yields nothing.
    pub fn page_input<K>(&self, raw: &str) -> Option<TableAction<K>> {
        let page = raw.trim().parse::<u32>().ok()?;
        (1..=self.pages)
            .contains(&page)
            .then_some(TableAction::GoToPage(page))
    }

    /// Page size picked from the selector; unknown sizes yield nothing.
    pub fn limit_choice<K>(&self, raw: &str) -> Option<TableAction<K>> {
        let limit = raw.trim().parse::<u32>().ok()?;
        PageLimit::try_from(limit).ok().map(TableAction::ChangeLimit)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableView<K> {
    pub columns: &'static [&'static str],
    pub body: TableBody<K>,
    pub pagination: PaginationControls,
    pub error: Option<String>,
}

impl<K: Clone + Serialize> TableView<K> {
    /// Derives the view from the list state.
    pub fn build<F, T>(list: &ListController<F, T>) -> Self
    where
        F: FilterSet,
        T: TableRecord<Key = K>,
    {
        Self::from_parts(list.rows(), list.is_loading(), list.error(), list.pagination())
    }

    pub fn from_parts<T>(
        rows: &[T],
        loading: bool,
        error: Option<&str>,
        pagination: &PaginationState,
    ) -> Self
    where
        T: TableRecord<Key = K>,
    {
        let body = if loading {
            TableBody::Skeleton {
                rows: pagination.limit().get(),
            }
        } else if rows.is_empty() {
            TableBody::Empty {
                message: T::EMPTY_MESSAGE,
            }
        } else {
            TableBody::Rows {
                rows: rows
                    .iter()
                    .enumerate()
                    .map(|(index, row)| TableRow {
                        number: pagination.row_number(index),
                        key: row.key(),
                        cells: row.cells(),
                        controls: row.controls(),
                    })
                    .collect(),
            }
        };

        Self {
            columns: T::COLUMNS,
            body,
            pagination: PaginationControls::new(pagination, T::NOUN),
            error: error.map(str::to_string),
        }
    }

    /// Action for the delete button of the row with `key`, unless it is disabled.
    pub fn delete(&self, key: &K) -> Option<TableAction<K>>
    where
        K: PartialEq,
    {
        match &self.body {
            TableBody::Rows { rows } => rows
                .iter()
                .find(|row| &row.key == key)
                .filter(|row| row.controls.delete_enabled)
                .map(|row| TableAction::Delete(row.key.clone())),
            _ => None,
        }
    }
}
