//! Page services: list pages driving a [`ListController`] plus the
//! add/edit/delete workflows of each resource.
//!
//! [`ListController`]: crate::listing::ListController

use serde::Serialize;
use thiserror::Error;

use crate::api::ApiError;
use crate::forms::FormError;

pub mod account;
pub mod campuses;
pub mod members;
pub mod questions;
pub mod suggested_questions;

/// Severity of a [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message shown to the user after an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Outcome of a table action handled by a list page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageEffect {
    /// Nothing to show; pager changes end here.
    None,
    Notice(Notice),
    /// Route the caller should open, such as an edit page.
    Navigate(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Local validation failed; nothing was sent.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The collaborator call failed; carries the user-facing message.
    #[error("{0}")]
    Api(String),

    #[error("권한이 없습니다")]
    Unauthorized,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Notice for failures that are shown as toasts; field errors stay inline.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            ServiceError::Form(_) => None,
            other => Some(Notice::error(other.to_string())),
        }
    }
}

/// Logs `err` and resolves the message of a failed submission.
pub(crate) fn submission_failed(err: ApiError, action: &str, fallback: &str) -> ServiceError {
    log::error!("Failed to {action}: {err}");
    ServiceError::Api(err.submission_message(fallback))
}

/// Logs `err` and resolves the notice of a failed row action on a list page.
pub(crate) fn row_action_failed(err: ApiError, action: &str, fallback: &str) -> Notice {
    log::error!("Failed to {action}: {err}");
    Notice::error(err.list_message(fallback))
}
