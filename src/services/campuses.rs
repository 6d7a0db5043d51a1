//! Campus list page and campus add/edit workflows.

use crate::api::{CampusFilters, CampusReader, CampusWriter};
use crate::domain::campus::{Campus, UpdateCampus};
use crate::domain::types::{CampusId, EntityStatus};
use crate::dto::table::{TableAction, TableView};
use crate::forms::campus::{CampusForm, CampusPayload};
use crate::listing::{FetchTicket, Filter, ListController, PageLimit, PagesSource, SyncOutcome};
use crate::services::{
    Notice, PageEffect, ServiceResult, row_action_failed, submission_failed,
};

pub const LOAD_ERROR: &str = "캠퍼스 목록을 불러오는데 실패했습니다";

pub type CampusTicket = FetchTicket<CampusFilters>;

/// State of the campus list page.
#[derive(Debug)]
pub struct CampusesPage {
    list: ListController<CampusFilters, Campus>,
}

impl Default for CampusesPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CampusesPage {
    pub fn new() -> Self {
        Self {
            list: ListController::new(PagesSource::Server, LOAD_ERROR),
        }
    }

    pub fn list(&self) -> &ListController<CampusFilters, Campus> {
        &self.list
    }

    pub fn view(&self) -> TableView<CampusId> {
        TableView::build(&self.list)
    }

    pub fn mount(&mut self) -> CampusTicket {
        self.list.mount()
    }

    pub fn set_search(&mut self, text: &str) -> Option<CampusTicket> {
        self.list.update_filters(|f| f.search = Filter::text(text))
    }

    pub fn set_status(&mut self, status: Filter<EntityStatus>) -> Option<CampusTicket> {
        self.list.update_filters(|f| f.status = status)
    }

    pub fn set_page(&mut self, page: u32) -> Option<CampusTicket> {
        self.list.set_page(page)
    }

    pub fn set_limit(&mut self, limit: PageLimit) -> Option<CampusTicket> {
        self.list.set_limit(limit)
    }

    /// Executes `ticket` and any follow-up request against `api`.
    pub async fn sync<R>(&mut self, api: &R, ticket: Option<CampusTicket>) -> Option<SyncOutcome>
    where
        R: CampusReader + ?Sized,
    {
        self.list
            .run(ticket, |query| async move { api.list_campuses(&query).await })
            .await
    }

    /// Updates the status and patches the row once the collaborator confirmed.
    pub async fn change_status<R>(&mut self, api: &R, id: &CampusId, status: EntityStatus) -> Notice
    where
        R: CampusWriter + ?Sized,
    {
        match api.update_campus(id, &UpdateCampus::status(status)).await {
            Ok(()) => {
                self.list
                    .patch_row(|campus| &campus.id == id, |campus| campus.status = status);
                log::info!("Campus {id} status changed to {status}");
                Notice::success("캠퍼스 상태가 업데이트되었습니다")
            }
            Err(err) => row_action_failed(
                err,
                "update campus status",
                "캠퍼스 상태를 업데이트하는데 실패했습니다",
            ),
        }
    }

    /// Marks the campus as default and reloads, since another row loses the flag.
    pub async fn set_default<R>(&mut self, api: &R, id: &CampusId) -> Notice
    where
        R: CampusReader + CampusWriter + ?Sized,
    {
        match api.set_default_campus(id).await {
            Ok(()) => {
                log::info!("Campus {id} set as default");
                let ticket = self.list.refresh();
                self.sync(api, Some(ticket)).await;
                Notice::success("기본 캠퍼스가 설정되었습니다")
            }
            Err(err) => row_action_failed(
                err,
                "set default campus",
                "기본 캠퍼스 설정에 실패했습니다",
            ),
        }
    }

    /// Deletes a confirmed campus and reloads the list.
    pub async fn delete<R>(&mut self, api: &R, id: &CampusId) -> Notice
    where
        R: CampusReader + CampusWriter + ?Sized,
    {
        let is_default = self
            .list
            .rows()
            .iter()
            .any(|campus| &campus.id == id && campus.is_default);
        if is_default {
            return Notice::error("기본 캠퍼스는 삭제할 수 없습니다");
        }

        match api.delete_campus(id).await {
            Ok(()) => {
                log::info!("Campus {id} deleted");
                let ticket = self.list.refresh();
                self.sync(api, Some(ticket)).await;
                Notice::success("캠퍼스가 삭제되었습니다")
            }
            Err(err) => row_action_failed(err, "delete campus", "캠퍼스 삭제에 실패했습니다"),
        }
    }

    pub async fn handle<R>(&mut self, api: &R, action: TableAction<CampusId>) -> PageEffect
    where
        R: CampusReader + CampusWriter + ?Sized,
    {
        match action {
            TableAction::Edit(id) => PageEffect::Navigate(format!("/campuses/edit/{id}")),
            TableAction::Delete(id) => PageEffect::Notice(self.delete(api, &id).await),
            TableAction::ChangeStatus(id, status) => {
                PageEffect::Notice(self.change_status(api, &id, status).await)
            }
            TableAction::SetDefault(id) => PageEffect::Notice(self.set_default(api, &id).await),
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
            TableAction::ToggleActive(..) => PageEffect::None,
        }
    }
}

/// Validates the add form and creates the campus.
pub async fn create_campus<R>(api: &R, form: CampusForm) -> ServiceResult<Notice>
where
    R: CampusWriter + ?Sized,
{
    let payload = CampusPayload::try_from(form)?;

    api.create_campus(&payload.into_new())
        .await
        .map_err(|err| {
            submission_failed(err, "create campus", "캠퍼스 생성 중 오류가 발생했습니다")
        })?;

    Ok(Notice::success("캠퍼스가 성공적으로 생성되었습니다"))
}

/// Loads the campus behind the edit page.
pub async fn load_campus_form<R>(api: &R, id: &CampusId) -> ServiceResult<CampusForm>
where
    R: CampusReader + ?Sized,
{
    let campus = api.get_campus(id).await.map_err(|err| {
        submission_failed(err, "load campus", "캠퍼스 상세 정보를 불러오는데 실패했습니다")
    })?;

    Ok(CampusForm::from(&campus))
}

pub async fn update_campus<R>(api: &R, id: &CampusId, form: CampusForm) -> ServiceResult<Notice>
where
    R: CampusWriter + ?Sized,
{
    let payload = CampusPayload::try_from(form)?;

    api.update_campus(id, &payload.into_update())
        .await
        .map_err(|err| {
            submission_failed(err, "update campus", "캠퍼스 수정 중 오류가 발생했습니다")
        })?;

    Ok(Notice::success("캠퍼스가 성공적으로 수정되었습니다"))
}

/// Deletes the campus from its edit page.
pub async fn delete_campus<R>(api: &R, id: &CampusId) -> ServiceResult<Notice>
where
    R: CampusWriter + ?Sized,
{
    api.delete_campus(id)
        .await
        .map_err(|err| submission_failed(err, "delete campus", "캠퍼스 삭제에 실패했습니다"))?;

    Ok(Notice::success("캠퍼스가 성공적으로 삭제되었습니다"))
}
