//! Reusable list-query state shared by every list page of the console.
//!
//! A page owns one [`controller::ListController`] which keeps the filter
//! values, the pagination window and the currently displayed rows. Every
//! state change that alters the outgoing query yields exactly one
//! [`controller::FetchTicket`]; responses are applied back through the
//! controller, which discards anything older than the latest ticket.

pub mod controller;
pub mod filter;
pub mod pagination;

pub use controller::{FetchTicket, ListController, ListPage, ListQuery, SyncOutcome};
pub use filter::{Filter, FilterSet, QueryParams, QueryValue};
pub use pagination::{PageLimit, PagesSource, PaginationState, ServerPagination};
