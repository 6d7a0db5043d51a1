//! Suggested (starter) question list page and its add/edit workflows.

use crate::api::{SuggestedQuestionFilters, SuggestedQuestionReader, SuggestedQuestionWriter};
use crate::domain::suggested_question::{SuggestedQuestion, SuggestedQuestionPayload};
use crate::domain::types::SuggestedQuestionId;
use crate::dto::table::{TableAction, TableView};
use crate::forms::suggested_question::SuggestedQuestionForm;
use crate::listing::{FetchTicket, Filter, ListController, PageLimit, PagesSource, SyncOutcome};
use crate::services::{Notice, PageEffect, ServiceResult, row_action_failed, submission_failed};

pub const LOAD_ERROR: &str = "시작 질문을 불러오는데 실패했습니다";

pub type SuggestedQuestionTicket = FetchTicket<SuggestedQuestionFilters>;

/// State of the suggested question list page.
///
/// The collaborator only reports `total` here, so the page count is derived
/// locally.
#[derive(Debug)]
pub struct SuggestedQuestionsPage {
    list: ListController<SuggestedQuestionFilters, SuggestedQuestion>,
}

impl Default for SuggestedQuestionsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestedQuestionsPage {
    pub fn new() -> Self {
        Self {
            list: ListController::new(PagesSource::Local, LOAD_ERROR),
        }
    }

    pub fn list(&self) -> &ListController<SuggestedQuestionFilters, SuggestedQuestion> {
        &self.list
    }

    pub fn view(&self) -> TableView<SuggestedQuestionId> {
        TableView::build(&self.list)
    }

    pub fn mount(&mut self) -> SuggestedQuestionTicket {
        self.list.mount()
    }

    pub fn set_active_filter(
        &mut self,
        is_active: Filter<bool>,
    ) -> Option<SuggestedQuestionTicket> {
        self.list.update_filters(|f| f.is_active = is_active)
    }

    pub fn set_page(&mut self, page: u32) -> Option<SuggestedQuestionTicket> {
        self.list.set_page(page)
    }

    pub fn set_limit(&mut self, limit: PageLimit) -> Option<SuggestedQuestionTicket> {
        self.list.set_limit(limit)
    }

    pub async fn sync<R>(
        &mut self,
        api: &R,
        ticket: Option<SuggestedQuestionTicket>,
    ) -> Option<SyncOutcome>
    where
        R: SuggestedQuestionReader + ?Sized,
    {
        self.list
            .run(ticket, |query| async move {
                api.list_suggested_questions(&query).await
            })
            .await
    }

    pub async fn toggle_active<R>(
        &mut self,
        api: &R,
        id: &SuggestedQuestionId,
        is_active: bool,
    ) -> Notice
    where
        R: SuggestedQuestionWriter + ?Sized,
    {
        match api.update_suggested_question_status(id, is_active).await {
            Ok(()) => {
                self.list
                    .patch_row(|question| &question.id == id, |question| {
                        question.is_active = is_active
                    });
                log::info!("Suggested question {id} active set to {is_active}");
                if is_active {
                    Notice::success("질문이 활성화되었습니다")
                } else {
                    Notice::success("질문이 비활성화되었습니다")
                }
            }
            Err(err) => row_action_failed(
                err,
                "update suggested question status",
                "질문 상태 업데이트에 실패했습니다",
            ),
        }
    }

    pub async fn delete<R>(&mut self, api: &R, id: &SuggestedQuestionId) -> Notice
    where
        R: SuggestedQuestionReader + SuggestedQuestionWriter + ?Sized,
    {
        match api.delete_suggested_question(id).await {
            Ok(()) => {
                log::info!("Suggested question {id} deleted");
                let ticket = self.list.refresh();
                self.sync(api, Some(ticket)).await;
                Notice::success("시작 질문이 성공적으로 삭제되었습니다")
            }
            Err(err) => row_action_failed(
                err,
                "delete suggested question",
                "시작 질문 삭제에 실패했습니다",
            ),
        }
    }

    pub async fn handle<R>(
        &mut self,
        api: &R,
        action: TableAction<SuggestedQuestionId>,
    ) -> PageEffect
    where
        R: SuggestedQuestionReader + SuggestedQuestionWriter + ?Sized,
    {
        match action {
            TableAction::Edit(id) => {
                PageEffect::Navigate(format!("/suggested-questions/edit/{id}"))
            }
            TableAction::Delete(id) => PageEffect::Notice(self.delete(api, &id).await),
            TableAction::ToggleActive(id, is_active) => {
                PageEffect::Notice(self.toggle_active(api, &id, is_active).await)
            }
            TableAction::GoToPage(page) => {
                let ticket = self.set_page(page);
                self.sync(api, ticket).await;
                PageEffect::None
            }
            TableAction::ChangeLimit(limit) => {
                let ticket = self.set_limit(limit);
                self.sync(api, ticket).await;
                PageEffect::None
            }
            TableAction::ChangeStatus(..) | TableAction::SetDefault(_) => PageEffect::None,
        }
    }
}

pub async fn create_suggested_question<R>(
    api: &R,
    form: SuggestedQuestionForm,
) -> ServiceResult<Notice>
where
    R: SuggestedQuestionWriter + ?Sized,
{
    let payload = SuggestedQuestionPayload::try_from(form)?;

    api.create_suggested_question(&payload).await.map_err(|err| {
        submission_failed(err, "create suggested question", "질문 생성 중 오류가 발생했습니다")
    })?;

    Ok(Notice::success("질문이 성공적으로 생성되었습니다"))
}

pub async fn load_suggested_question_form<R>(
    api: &R,
    id: &SuggestedQuestionId,
) -> ServiceResult<SuggestedQuestionForm>
where
    R: SuggestedQuestionReader + ?Sized,
{
    let question = api.get_suggested_question(id).await.map_err(|err| {
        submission_failed(err, "load suggested question", "질문을 불러오는데 실패했습니다")
    })?;

    Ok(SuggestedQuestionForm::from(&question))
}

pub async fn update_suggested_question<R>(
    api: &R,
    id: &SuggestedQuestionId,
    form: SuggestedQuestionForm,
) -> ServiceResult<Notice>
where
    R: SuggestedQuestionWriter + ?Sized,
{
    let payload = SuggestedQuestionPayload::try_from(form)?;

    api.update_suggested_question(id, &payload)
        .await
        .map_err(|err| {
            submission_failed(err, "update suggested question", "질문 수정 중 오류가 발생했습니다")
        })?;

    Ok(Notice::success("질문이 성공적으로 수정되었습니다"))
}

pub async fn delete_suggested_question<R>(
    api: &R,
    id: &SuggestedQuestionId,
) -> ServiceResult<Notice>
where
    R: SuggestedQuestionWriter + ?Sized,
{
    api.delete_suggested_question(id).await.map_err(|err| {
        submission_failed(err, "delete suggested question", "질문 삭제에 실패했습니다")
    })?;

    Ok(Notice::success("질문이 성공적으로 삭제되었습니다"))
}
