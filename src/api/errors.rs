use thiserror::Error;

/// Generic text shown when nothing more specific is known about a failure.
pub const UNEXPECTED_ERROR: &str = "예기치 않은 오류가 발생했습니다";

/// Failure of a call to the collaborator API.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The collaborator answered with a non-success status.
    #[error("request rejected with status {status}: {message:?}")]
    Rejected {
        status: u16,
        /// `message` of the `{ message }` error body, when present.
        message: Option<String>,
    },

    /// The request never produced a response (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// A success response did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Message supplied by the collaborator in its error body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Message shown when a list load fails: the collaborator's text or `fallback`.
    pub fn list_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// Message shown when a form submission or row action fails.
    ///
    /// Resolution order: collaborator message, operation `fallback` for any
    /// other collaborator answer, transport message, generic text.
    pub fn submission_message(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self {
            ApiError::Rejected { .. } | ApiError::Decode(_) => fallback.to_string(),
            ApiError::Transport(message) if !message.is_empty() => message.clone(),
            ApiError::Transport(_) | ApiError::Unexpected(_) => UNEXPECTED_ERROR.to_string(),
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::Unexpected(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_everywhere() {
        let err = ApiError::Rejected {
            status: 409,
            message: Some("이미 존재하는 캠퍼스입니다".to_string()),
        };
        assert_eq!(err.list_message("fallback"), "이미 존재하는 캠퍼스입니다");
        assert_eq!(err.submission_message("fallback"), "이미 존재하는 캠퍼스입니다");
    }

    #[test]
    fn blank_server_message_is_ignored() {
        let err = ApiError::Rejected {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(
            err.submission_message("캠퍼스 생성 중 오류가 발생했습니다"),
            "캠퍼스 생성 중 오류가 발생했습니다"
        );
    }

    #[test]
    fn submission_falls_back_to_transport_then_generic() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.submission_message("fallback"), "connection refused");
        assert_eq!(err.list_message("목록 실패"), "목록 실패");

        let err = ApiError::Unexpected("boom".to_string());
        assert_eq!(err.submission_message("fallback"), UNEXPECTED_ERROR);
    }
}
