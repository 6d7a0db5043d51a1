use crate::domain::member::Member;
use crate::domain::types::MemberId;
use crate::dto::table::{RowControls, StatusControl, TableRecord};
use crate::dto::{format_date, format_datetime};

impl TableRecord for Member {
    type Key = MemberId;

    const COLUMNS: &'static [&'static str] = &[
        "No.",
        "이름",
        "이메일",
        "역할",
        "마지막 로그인",
        "가입일",
        "상태",
        "작업",
    ];
    const EMPTY_MESSAGE: &'static str = "멤버가 없습니다";
    const NOUN: &'static str = "멤버";

    fn key(&self) -> MemberId {
        self.id.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.role.label().to_string(),
            format_datetime(self.last_login.as_ref(), "없음"),
            format_date(self.created_at.as_ref()),
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
