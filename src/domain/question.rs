use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::types::{AuthorId, CampusId, EntityStatus, ImageId, QuestionId};

/// Campus reference populated into a question by the collaborator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampusRef {
    #[serde(rename = "_id")]
    pub id: CampusId,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Author reference populated into a question by the collaborator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthorRef {
    #[serde(rename = "_id")]
    pub id: AuthorId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: QuestionId,
    /// Sequential public number shown in the first table column.
    #[serde(default, deserialize_with = "string_or_number")]
    pub question_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: EntityStatus,
    #[serde(rename = "campusId")]
    pub campus: CampusRef,
    #[serde(rename = "authorId", default)]
    pub author: Option<AuthorRef>,
    #[serde(default)]
    pub image_ids: Vec<ImageId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Question {
    /// Campus name used to address the question in mutating endpoints.
    pub fn campus_name(&self) -> &str {
        &self.campus.name
    }

    /// Author email or the localized "unknown" label.
    pub fn author_label(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|author| author.email.as_deref())
            .unwrap_or("알 수 없음")
    }
}

/// Entry of the author filter drop-down.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub title: String,
    pub content: String,
    pub status: EntityStatus,
    pub campus_id: CampusId,
    pub tags: Vec<String>,
    pub image_ids: Vec<ImageId>,
}

/// Partial question update. `image_ids` is always sent so removals stick.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus_id: Option<CampusId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub image_ids: Vec<ImageId>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
