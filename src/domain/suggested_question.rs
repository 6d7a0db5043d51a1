use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::SuggestedQuestionId;

/// Starter question offered to chatbot users before they type anything.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedQuestion {
    #[serde(rename = "_id")]
    pub id: SuggestedQuestionId,
    pub question: String,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body used both for creation and full replacement.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedQuestionPayload {
    pub question: String,
    pub is_active: bool,
}
