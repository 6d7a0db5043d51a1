use crate::domain::suggested_question::SuggestedQuestion;
use crate::domain::types::SuggestedQuestionId;
use crate::dto::format_date;
use crate::dto::table::{RowControls, StatusControl, TableRecord};

impl TableRecord for SuggestedQuestion {
    type Key = SuggestedQuestionId;

    const COLUMNS: &'static [&'static str] = &["No.", "질문", "생성일", "상태", "작업"];
    const EMPTY_MESSAGE: &'static str = "제안된 질문이 없습니다";
    const NOUN: &'static str = "질문";

    fn key(&self) -> SuggestedQuestionId {
        self.id.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![self.question.clone(), format_date(self.created_at.as_ref())]
    }

    fn controls(&self) -> RowControls {
        RowControls {
            status: Some(StatusControl::Switch {
                active: self.is_active,
            }),
            ..RowControls::default()
        }
    }
}
