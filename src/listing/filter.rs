use std::fmt::Debug;
use std::str::FromStr;

use crate::domain::types::{AuthorId, CampusId, EntityStatus, MemberRole};

/// Choice literals the filter drop-downs use for "no filter".
const ANY_CHOICES: [&str; 3] = ["All", "all", ""];

/// A single filter value. `Any` applies no filter and never reaches the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter<T> {
    #[default]
    Any,
    Only(T),
}

impl<T> Filter<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Filter::Any => None,
            Filter::Only(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Filter<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Filter::Any, Filter::Only)
    }
}

impl<T: FromStr> Filter<T> {
    /// Parses a drop-down choice, mapping the "All" entry to [`Filter::Any`].
    pub fn from_choice(raw: &str) -> Result<Self, T::Err> {
        if ANY_CHOICES.contains(&raw) {
            return Ok(Filter::Any);
        }
        raw.parse().map(Filter::Only)
    }
}

impl Filter<String> {
    /// Free-text search; an empty input means no search.
    pub fn text<S: Into<String>>(value: S) -> Self {
        let value = value.into();
        if value.is_empty() {
            Filter::Any
        } else {
            Filter::Only(value)
        }
    }
}

/// Renders a filter value as a query-string literal.
pub trait QueryValue {
    fn query_value(&self) -> String;
}

impl QueryValue for String {
    fn query_value(&self) -> String {
        self.clone()
    }
}

impl QueryValue for bool {
    fn query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for EntityStatus {
    fn query_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl QueryValue for MemberRole {
    fn query_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl QueryValue for CampusId {
    fn query_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl QueryValue for AuthorId {
    fn query_value(&self) -> String {
        self.as_str().to_string()
    }
}

/// Ordered query-string parameters of one list request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.push((name, value.into()));
    }

    /// Appends `name=value` only when the filter is applied.
    pub fn push_filter<T: QueryValue>(&mut self, name: &'static str, filter: &Filter<T>) {
        if let Some(value) = filter.value() {
            self.push(name, value.query_value());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// Filter values of one list page.
pub trait FilterSet: Clone + Debug + Default + PartialEq {
    /// Appends a parameter for every applied filter.
    fn append_params(&self, params: &mut QueryParams);
}
