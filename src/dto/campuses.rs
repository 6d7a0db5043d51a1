use crate::domain::campus::Campus;
use crate::domain::types::CampusId;
use crate::dto::table::{RowControls, StatusControl, TableRecord};
use crate::dto::{NO_VALUE, format_date};

impl TableRecord for Campus {
    type Key = CampusId;

    const COLUMNS: &'static [&'static str] = &[
        "No.",
        "캠퍼스명",
        "표시명",
        "컬렉션명",
        "설명",
        "생성일",
        "상태",
        "기본",
        "작업",
    ];
    const EMPTY_MESSAGE: &'static str = "캠퍼스가 없습니다";
    const NOUN: &'static str = "캠퍼스";

    fn key(&self) -> CampusId {
        self.id.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.display_name.clone(),
            self.collection_name.clone().unwrap_or_default(),
            self.description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(NO_VALUE)
                .to_string(),
            format_date(self.created_at.as_ref()),
        ]
    }

    fn controls(&self) -> RowControls {
        RowControls {
            status: Some(StatusControl::Status {
                current: self.status,
            }),
            default: Some(self.is_default),
            delete_enabled: !self.is_default,
            delete_title: if self.is_default {
                "기본 캠퍼스는 삭제할 수 없습니다"
            } else {
                "삭제"
            },
        }
    }
}
