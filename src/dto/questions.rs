use serde::Serialize;

use crate::domain::campus::Campus;
use crate::domain::question::{Author, Question};
use crate::domain::types::QuestionId;
use crate::dto::format_date;
use crate::dto::table::{RowControls, StatusControl, TableRecord};

/// Questions are addressed by id and the name of their campus collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionKey {
    pub id: QuestionId,
    pub campus_name: String,
}

/// Drop-down options of the questions page.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct QuestionFilterOptions {
    pub authors: Vec<Author>,
    pub campuses: Vec<Campus>,
}

impl TableRecord for Question {
    type Key = QuestionKey;

    const COLUMNS: &'static [&'static str] = &[
        "No.", "질문 ID", "제목", "작성자", "생성일", "수정일", "상태", "작업",
    ];
    const EMPTY_MESSAGE: &'static str = "질문이 없습니다";
    const NOUN: &'static str = "질문";

    fn key(&self) -> QuestionKey {
        QuestionKey {
            id: self.id.clone(),
            campus_name: self.campus_name().to_string(),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.question_id.clone().unwrap_or_default(),
            self.title.clone(),
            self.author_label().to_string(),
            format_date(self.created_at.as_ref()),
            format_date(self.updated_at.as_ref()),
        ]
    }

    fn controls(&self) -> RowControls {
        RowControls {
            status: Some(StatusControl::Status {
                current: self.status,
            }),
            ..RowControls::default()
        }
    }
}
