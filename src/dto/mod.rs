//! DTO modules that bridge page services with the table view and templates.

use chrono::{DateTime, Utc};

pub mod campuses;
pub mod members;
pub mod questions;
pub mod suggested_questions;
pub mod table;

/// Placeholder for cells without a value.
pub const NO_VALUE: &str = "-";

pub(crate) fn format_date(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NO_VALUE.to_string())
}

pub(crate) fn format_datetime(value: Option<&DateTime<Utc>>, missing: &str) -> String {
    value
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| missing.to_string())
}
