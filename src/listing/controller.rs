use std::future::Future;

use crate::api::errors::ApiResult;
use crate::listing::filter::{FilterSet, QueryParams};
use crate::listing::pagination::{PageLimit, PagesSource, PaginationState, ServerPagination};

/// Everything that determines one list request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery<F> {
    pub page: u32,
    pub limit: PageLimit,
    pub filters: F,
}

impl<F: FilterSet> ListQuery<F> {
    pub fn new(filters: F) -> Self {
        Self {
            page: 1,
            limit: PageLimit::default(),
            filters,
        }
    }

    /// Query-string parameters; filters set to "any" are left out.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("page", self.page.to_string());
        params.push("limit", self.limit.get().to_string());
        self.filters.append_params(&mut params);
        params
    }
}

/// One page of rows as returned by the collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: ServerPagination,
}

/// Permission to issue exactly one list request.
///
/// The ticket must be handed back to [`ListController::apply`] together with
/// the outcome of the request.
#[derive(Debug)]
#[must_use = "a ticket represents a list request that still has to be issued"]
pub struct FetchTicket<F> {
    seq: u64,
    query: ListQuery<F>,
}

impl<F> FetchTicket<F> {
    pub fn query(&self) -> &ListQuery<F> {
        &self.query
    }
}

/// What happened when a response was handed back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Rows and pagination were replaced.
    Replaced,
    /// The request failed; rows were kept and the error was recorded.
    Failed,
    /// A newer request was issued meanwhile; the response was dropped.
    Discarded,
}

/// Filter, pagination and row state of one list page.
#[derive(Debug)]
pub struct ListController<F, T> {
    filters: F,
    pagination: PaginationState,
    rows: Vec<T>,
    loading: bool,
    error: Option<String>,
    pages_source: PagesSource,
    load_error: &'static str,
    requested: Option<ListQuery<F>>,
    latest_seq: u64,
}

impl<F: FilterSet, T> ListController<F, T> {
    /// Creates the controller in its initial loading state.
    ///
    /// `load_error` is shown when a failed load carries no collaborator message.
    pub fn new(pages_source: PagesSource, load_error: &'static str) -> Self {
        Self {
            filters: F::default(),
            pagination: PaginationState::default(),
            rows: Vec::new(),
            loading: true,
            error: None,
            pages_source,
            load_error,
            requested: None,
            latest_seq: 0,
        }
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The query the current state describes.
    pub fn current_query(&self) -> ListQuery<F> {
        ListQuery {
            page: self.pagination.page(),
            limit: self.pagination.limit(),
            filters: self.filters.clone(),
        }
    }

    /// Initial load of the page.
    pub fn mount(&mut self) -> FetchTicket<F> {
        self.issue(self.current_query())
    }

    /// Reloads the current query even though nothing changed.
    pub fn refresh(&mut self) -> FetchTicket<F> {
        self.issue(self.current_query())
    }

    /// Applies `update` to the filters; a changed filter resets the page.
    pub fn update_filters(&mut self, update: impl FnOnce(&mut F)) -> Option<FetchTicket<F>> {
        let mut filters = self.filters.clone();
        update(&mut filters);
        if filters == self.filters {
            return None;
        }
        self.filters = filters;
        self.pagination.reset_page();
        self.poll()
    }

    /// Moves to page `n`; out-of-range pages are ignored without a request.
    pub fn set_page(&mut self, n: u32) -> Option<FetchTicket<F>> {
        if !self.pagination.set_page(n) {
            log::debug!("ignoring page {n}, valid range is 1..={}", self.pagination.pages());
            return None;
        }
        self.poll()
    }

    pub fn set_limit(&mut self, limit: PageLimit) -> Option<FetchTicket<F>> {
        self.pagination.set_limit(limit);
        self.poll()
    }

    /// Issues a request when the current query differs from the last issued one.
    pub fn poll(&mut self) -> Option<FetchTicket<F>> {
        let query = self.current_query();
        if self.requested.as_ref() == Some(&query) {
            return None;
        }
        Some(self.issue(query))
    }

    fn issue(&mut self, query: ListQuery<F>) -> FetchTicket<F> {
        self.latest_seq += 1;
        self.loading = true;
        self.requested = Some(query.clone());
        log::debug!("issuing list request #{}: {query:?}", self.latest_seq);
        FetchTicket {
            seq: self.latest_seq,
            query,
        }
    }

    /// Applies the outcome of the request behind `ticket`.
    pub fn apply(
        &mut self,
        ticket: FetchTicket<F>,
        result: ApiResult<ListPage<T>>,
    ) -> SyncOutcome {
        if ticket.seq != self.latest_seq {
            log::debug!(
                "discarding response #{} superseded by #{}",
                ticket.seq,
                self.latest_seq
            );
            return SyncOutcome::Discarded;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.rows = page.items;
                self.pagination
                    .replace_from_server(&page.pagination, self.pages_source);
                self.error = None;
                SyncOutcome::Replaced
            }
            Err(err) => {
                log::error!("Failed to load list: {err}");
                self.error = Some(err.list_message(self.load_error));
                SyncOutcome::Failed
            }
        }
    }

    /// Runs `ticket` and any follow-up request through `fetch` until the state settles.
    ///
    /// A follow-up happens when the server reports a page other than the one
    /// requested: the new page is a state change like any other.
    pub async fn run<Q, Fut>(
        &mut self,
        ticket: Option<FetchTicket<F>>,
        mut fetch: Q,
    ) -> Option<SyncOutcome>
    where
        Q: FnMut(ListQuery<F>) -> Fut,
        Fut: Future<Output = ApiResult<ListPage<T>>>,
    {
        let mut next = ticket;
        let mut last = None;
        while let Some(ticket) = next {
            let result = fetch(ticket.query().clone()).await;
            let outcome = self.apply(ticket, result);
            next = match outcome {
                SyncOutcome::Replaced => self.poll(),
                SyncOutcome::Failed | SyncOutcome::Discarded => None,
            };
            last = Some(outcome);
        }
        last
    }

    /// Patches the first row matching `matches` in place.
    ///
    /// Callers invoke this only after the collaborator confirmed the change.
    pub fn patch_row(&mut self, matches: impl Fn(&T) -> bool, patch: impl FnOnce(&mut T)) -> bool {
        match self.rows.iter_mut().find(|row| matches(row)) {
            Some(row) => {
                patch(row);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::errors::ApiError;
    use crate::domain::types::EntityStatus;
    use crate::listing::filter::Filter;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Filters {
        search: Filter<String>,
        status: Filter<EntityStatus>,
    }

    impl FilterSet for Filters {
        fn append_params(&self, params: &mut QueryParams) {
            params.push_filter("search", &self.search);
            params.push_filter("status", &self.status);
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: u32,
        name: String,
        status: EntityStatus,
    }

    fn row(id: u32, name: &str) -> Row {
        Row {
            id,
            name: name.to_string(),
            status: EntityStatus::Active,
        }
    }

    fn page(items: Vec<Row>, total: u64, page: u32, pages: u32) -> ApiResult<ListPage<Row>> {
        Ok(ListPage {
            items,
            pagination: ServerPagination {
                total,
                page: Some(page),
                pages: Some(pages),
                limit: Some(10),
            },
        })
    }

    fn controller() -> ListController<Filters, Row> {
        ListController::new(PagesSource::Server, "목록을 불러오는데 실패했습니다")
    }

    fn loaded(total: u64, page_no: u32, pages: u32) -> ListController<Filters, Row> {
        let mut list = controller();
        let ticket = list.mount();
        list.apply(ticket, page(vec![row(1, "a"), row(2, "b")], total, page_no, pages));
        list
    }

    #[test]
    fn starts_loading_with_default_window() {
        let list = controller();
        assert!(list.is_loading());
        assert_eq!(list.pagination().page(), 1);
        assert_eq!(list.pagination().limit(), PageLimit::Ten);
        assert_eq!(list.pagination().pages(), 1);
    }

    #[test]
    fn mount_issues_request_and_success_clears_loading() {
        let mut list = controller();
        let ticket = list.mount();
        assert_eq!(ticket.query().page, 1);
        assert!(list.is_loading());

        let outcome = list.apply(ticket, page(vec![row(1, "a")], 1, 1, 1));

        assert_eq!(outcome, SyncOutcome::Replaced);
        assert!(!list.is_loading());
        assert_eq!(list.rows().len(), 1);
    }

    #[test]
    fn any_filters_are_left_out_of_the_query() {
        let mut list = loaded(2, 1, 1);
        let ticket = list
            .update_filters(|f| f.status = Filter::Only(EntityStatus::Inactive))
            .unwrap();
        let params = ticket.query().to_params();
        assert_eq!(params.get("status"), Some("INACTIVE"));
        assert!(!params.contains("search"));

        list.apply(ticket, page(vec![], 0, 1, 1));
        let ticket = list.update_filters(|f| f.status = Filter::Any).unwrap();
        assert!(!ticket.query().to_params().contains("status"));
    }

    #[test]
    fn filter_change_resets_page() {
        let mut list = loaded(25, 1, 3);
        let ticket = list.set_page(3).unwrap();
        list.apply(ticket, page(vec![row(21, "u")], 25, 3, 3));

        let ticket = list
            .update_filters(|f| f.search = Filter::text("react"))
            .unwrap();

        assert_eq!(ticket.query().page, 1);
        assert_eq!(list.pagination().page(), 1);
    }

    #[test]
    fn setting_filter_to_current_value_does_not_refetch() {
        let mut list = loaded(25, 1, 3);
        let ticket = list
            .update_filters(|f| f.status = Filter::Only(EntityStatus::Active))
            .unwrap();
        list.apply(ticket, page(vec![], 0, 1, 1));

        assert!(
            list.update_filters(|f| f.status = Filter::Only(EntityStatus::Active))
                .is_none()
        );
        assert!(list.update_filters(|f| f.search = Filter::text("")).is_none());
    }

    #[test]
    fn set_limit_resets_page_and_refetches() {
        let mut list = loaded(25, 1, 3);
        let ticket = list.set_page(2).unwrap();
        list.apply(ticket, page(vec![], 25, 2, 3));

        let ticket = list.set_limit(PageLimit::Twenty).unwrap();

        assert_eq!(ticket.query().page, 1);
        assert_eq!(ticket.query().limit, PageLimit::Twenty);
        assert_eq!(list.pagination().page(), 1);
    }

    #[test]
    fn out_of_range_page_issues_no_request() {
        let mut list = loaded(25, 3, 3);

        assert!(list.set_page(4).is_none());
        assert!(list.set_page(0).is_none());
        assert_eq!(list.pagination().page(), 3);
        assert!(!list.is_loading());
    }

    #[test]
    fn same_page_does_not_refetch() {
        let mut list = loaded(25, 1, 3);
        assert!(list.set_page(1).is_none());
    }

    #[test]
    fn failure_keeps_previous_rows_and_records_message() {
        let mut list = loaded(2, 1, 1);
        let before = list.rows().to_vec();

        let ticket = list.refresh();
        let outcome = list.apply(
            ticket,
            Err(ApiError::Rejected {
                status: 500,
                message: Some("서버 오류".to_string()),
            }),
        );

        assert_eq!(outcome, SyncOutcome::Failed);
        assert_eq!(list.rows(), before.as_slice());
        assert_eq!(list.error(), Some("서버 오류"));
        assert!(!list.is_loading());
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let mut list = controller();
        let ticket = list.mount();
        list.apply(ticket, Err(ApiError::Transport("connection refused".into())));
        assert_eq!(list.error(), Some("목록을 불러오는데 실패했습니다"));
    }

    #[test]
    fn success_clears_previous_error() {
        let mut list = controller();
        let ticket = list.mount();
        list.apply(ticket, Err(ApiError::Transport("down".into())));
        let ticket = list.refresh();
        list.apply(ticket, page(vec![row(1, "a")], 1, 1, 1));
        assert_eq!(list.error(), None);
    }

    #[test]
    fn stale_response_arriving_last_is_discarded() {
        let mut list = loaded(2, 1, 1);
        let react = list
            .update_filters(|f| f.search = Filter::text("react"))
            .unwrap();
        let redux = list
            .update_filters(|f| f.search = Filter::text("redux"))
            .unwrap();

        let outcome = list.apply(redux, page(vec![row(9, "redux")], 1, 1, 1));
        assert_eq!(outcome, SyncOutcome::Replaced);

        let outcome = list.apply(react, page(vec![row(5, "react")], 1, 1, 1));
        assert_eq!(outcome, SyncOutcome::Discarded);
        assert_eq!(list.rows()[0].name, "redux");
    }

    #[test]
    fn loading_stays_on_until_latest_response() {
        let mut list = loaded(2, 1, 1);
        let first = list
            .update_filters(|f| f.search = Filter::text("a"))
            .unwrap();
        let second = list
            .update_filters(|f| f.search = Filter::text("ab"))
            .unwrap();

        list.apply(first, page(vec![], 0, 1, 1));
        assert!(list.is_loading());

        list.apply(second, page(vec![], 0, 1, 1));
        assert!(!list.is_loading());
    }

    #[test]
    fn patch_row_changes_only_the_matching_row() {
        let mut list = loaded(2, 1, 1);

        let patched = list.patch_row(|r| r.id == 2, |r| r.status = EntityStatus::Inactive);

        assert!(patched);
        assert_eq!(list.rows()[0].status, EntityStatus::Active);
        assert_eq!(list.rows()[1].status, EntityStatus::Inactive);
        assert!(!list.patch_row(|r| r.id == 42, |r| r.status = EntityStatus::Inactive));
    }

    #[tokio::test]
    async fn run_follows_server_page_correction() {
        let mut list = loaded(30, 1, 3);
        let ticket = list.set_page(3).unwrap();
        let mut requested_pages = Vec::new();

        let outcome = list
            .run(Some(ticket), |query| {
                requested_pages.push(query.page);
                let corrected = if query.page == 3 { 2 } else { query.page };
                async move { page(vec![row(11, "k")], 12, corrected, 2) }
            })
            .await;

        assert_eq!(outcome, Some(SyncOutcome::Replaced));
        assert_eq!(requested_pages, vec![3, 2]);
        assert_eq!(list.pagination().page(), 2);
    }

    #[tokio::test]
    async fn run_without_ticket_does_nothing() {
        let mut list = loaded(2, 1, 1);
        let outcome = list
            .run(None, |_| async { page(vec![], 0, 1, 1) })
            .await;
        assert_eq!(outcome, None);
    }
}
