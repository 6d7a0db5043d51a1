//! Response bodies of the collaborator API.

use serde::Deserialize;

use crate::domain::campus::Campus;
use crate::domain::member::Member;
use crate::domain::question::{Author, Question};
use crate::domain::suggested_question::SuggestedQuestion;
use crate::domain::types::ImageId;
use crate::listing::{ListPage, ServerPagination};

#[derive(Debug, Deserialize)]
pub struct CampusList {
    pub campuses: Vec<Campus>,
    #[serde(default)]
    pub pagination: ServerPagination,
}

#[derive(Debug, Deserialize)]
pub struct QuestionList {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub pagination: ServerPagination,
}

#[derive(Debug, Deserialize)]
pub struct MemberList {
    pub users: Vec<Member>,
    #[serde(default)]
    pub pagination: ServerPagination,
}

/// Suggested questions come back as `{ data, total }` without page numbers.
#[derive(Debug, Deserialize)]
pub struct SuggestedQuestionList {
    pub data: Vec<SuggestedQuestion>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CampusEnvelope {
    pub campus: Campus,
}

#[derive(Debug, Deserialize)]
pub struct MemberEnvelope {
    pub user: Member,
}

#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct AuthorList {
    pub authors: Vec<Author>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedQuestion {
    #[serde(deserialize_with = "question_number")]
    pub question_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub image_id: ImageId,
}

/// `{ message }` body attached to rejected requests.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl From<CampusList> for ListPage<Campus> {
    fn from(list: CampusList) -> Self {
        ListPage {
            items: list.campuses,
            pagination: list.pagination,
        }
    }
}

impl From<QuestionList> for ListPage<Question> {
    fn from(list: QuestionList) -> Self {
        ListPage {
            items: list.questions,
            pagination: list.pagination,
        }
    }
}

impl From<MemberList> for ListPage<Member> {
    fn from(list: MemberList) -> Self {
        ListPage {
            items: list.users,
            pagination: list.pagination,
        }
    }
}

impl From<SuggestedQuestionList> for ListPage<SuggestedQuestion> {
    fn from(list: SuggestedQuestionList) -> Self {
        // A missing or zero total falls back to the number of rows returned.
        let total = list
            .total
            .filter(|total| *total > 0)
            .unwrap_or(list.data.len() as u64);
        ListPage {
            items: list.data,
            pagination: ServerPagination {
                total,
                ..ServerPagination::default()
            },
        }
    }
}

fn question_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected question number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggested_total_falls_back_to_row_count() {
        let body = serde_json::json!({
            "data": [
                {"_id": "s1", "question": "학식 메뉴는?", "isActive": true},
                {"_id": "s2", "question": "도서관 운영시간은?", "isActive": false}
            ]
        });

        let list: SuggestedQuestionList = serde_json::from_value(body).unwrap();
        let page = ListPage::from(list);

        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.pages, None);
    }

    #[test]
    fn campus_list_keeps_server_pagination() {
        let body = serde_json::json!({
            "campuses": [],
            "pagination": {"total": 25, "page": 3, "pages": 3, "limit": 10}
        });

        let page = ListPage::from(serde_json::from_value::<CampusList>(body).unwrap());

        assert_eq!(page.pagination.pages, Some(3));
        assert_eq!(page.pagination.page, Some(3));
        assert!(page.items.is_empty());
    }

    #[test]
    fn created_question_accepts_numeric_id() {
        let created: CreatedQuestion =
            serde_json::from_value(serde_json::json!({"questionId": 41})).unwrap();
        assert_eq!(created.question_id, "41");
    }
}
