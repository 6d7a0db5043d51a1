//! Member list page and member add/edit workflows. Master admins only.

use crate::api::{MemberFilters, MemberReader, MemberWriter};
use crate::domain::member::{Member, NewMember, UpdateMember};
use crate::domain::types::{EntityStatus, MemberId, MemberRole};
use crate::dto::table::{TableAction, TableView};
use crate::forms::member::{AddMemberForm, EditMemberForm};
use crate::listing::{FetchTicket, Filter, ListController, PageLimit, PagesSource, SyncOutcome};
use crate::services::{
    Notice, PageEffect, ServiceError, ServiceResult, row_action_failed, submission_failed,
};
use crate::session::SessionContext;

pub const LOAD_ERROR: &str = "멤버 목록을 불러오는데 실패했습니다";

pub type MemberTicket = FetchTicket<MemberFilters>;

fn ensure_master_admin(session: &SessionContext) -> ServiceResult<()> {
    if session.is_master_admin() {
        Ok(())
    } else {
        log::warn!(
            "Member management denied for {} ({})",
            session.user().email,
            session.user().role
        );
        Err(ServiceError::Unauthorized)
    }
}

/// State of the member list page.
#[derive(Debug)]
pub struct MembersPage {
    list: ListController<MemberFilters, Member>,
}

impl MembersPage {
    /// Opens the page for `session`; other roles are turned away.
    pub fn open(session: &SessionContext) -> ServiceResult<Self> {
        ensure_master_admin(session)?;
        Ok(Self {
            list: ListController::new(PagesSource::Server, LOAD_ERROR),
        })
    }

    pub fn list(&self) -> &ListController<MemberFilters, Member> {
        &self.list
    }

    pub fn view(&self) -> TableView<MemberId> {
        TableView::build(&self.list)
    }

    pub fn mount(&mut self) -> MemberTicket {
        self.list.mount()
    }

    pub fn set_role(&mut self, role: Filter<MemberRole>) -> Option<MemberTicket> {
        self.list.update_filters(|f| f.role = role)
    }

    pub fn set_status(&mut self, status: Filter<EntityStatus>) -> Option<MemberTicket> {
        self.list.update_filters(|f| f.status = status)
    }

    pub fn set_page(&mut self, page: u32) -> Option<MemberTicket> {
        self.list.set_page(page)
    }

    pub fn set_limit(&mut self, limit: PageLimit) -> Option<MemberTicket> {
        self.list.set_limit(limit)
    }

    pub async fn sync<R>(&mut self, api: &R, ticket: Option<MemberTicket>) -> Option<SyncOutcome>
    where
        R: MemberReader + ?Sized,
    {
        self.list
            .run(ticket, |query| async move { api.list_members(&query).await })
            .await
    }

    pub async fn change_status<R>(&mut self, api: &R, id: &MemberId, status: EntityStatus) -> Notice
    where
        R: MemberWriter + ?Sized,
    {
        match api.update_member(id, &UpdateMember::status(status)).await {
            Ok(()) => {
                self.list
                    .patch_row(|member| &member.id == id, |member| member.status = status);
                log::info!("Member {id} status changed to {status}");
                Notice::success("멤버 상태가 업데이트되었습니다")
            }
            Err(err) => row_action_failed(
                err,
                "update member status",
                "멤버 상태를 업데이트하는데 실패했습니다",
            ),
        }
    }

    pub async fn delete<R>(&mut self, api: &R, id: &MemberId) -> Notice
    where
        R: MemberReader + MemberWriter + ?Sized,
    {
        match api.delete_member(id).await {
            Ok(()) => {
                log::info!("Member {id} deleted");
                let ticket = self.list.refresh();
                self.sync(api, Some(ticket)).await;
                Notice::success("멤버가 삭제되었습니다")
            }
            Err(err) => row_action_failed(err, "delete member", "멤버 삭제에 실패했습니다"),
        }
    }

    pub async fn handle<R>(&mut self, api: &R, action: TableAction<MemberId>) -> PageEffect
    where
        R: MemberReader + MemberWriter + ?Sized,
    {
        match action {
            TableAction::Edit(id) => PageEffect::Navigate(format!("/members/edit/{id}")),
            TableAction::Delete(id) => PageEffect::Notice(self.delete(api, &id).await),
            TableAction::ChangeStatus(id, status) => {
                PageEffect::Notice(self.change_status(api, &id, status).await)
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
            TableAction::SetDefault(_) | TableAction::ToggleActive(..) => PageEffect::None,
        }
    }
}

pub async fn create_member<R>(
    api: &R,
    session: &SessionContext,
    form: AddMemberForm,
) -> ServiceResult<Notice>
where
    R: MemberWriter + ?Sized,
{
    ensure_master_admin(session)?;
    let member = NewMember::try_from(form)?;

    api.create_member(&member).await.map_err(|err| {
        submission_failed(err, "create member", "멤버 추가 중 오류가 발생했습니다")
    })?;

    log::info!("Member {} created", member.email);
    Ok(Notice::success("멤버가 성공적으로 추가되었습니다"))
}

pub async fn load_member_form<R>(
    api: &R,
    session: &SessionContext,
    id: &MemberId,
) -> ServiceResult<EditMemberForm>
where
    R: MemberReader + ?Sized,
{
    ensure_master_admin(session)?;
    let member = api.get_member(id).await.map_err(|err| {
        submission_failed(err, "load member", "멤버 상세 정보를 불러오는데 실패했습니다")
    })?;

    Ok(EditMemberForm::from(&member))
}

pub async fn update_member<R>(
    api: &R,
    session: &SessionContext,
    id: &MemberId,
    form: EditMemberForm,
) -> ServiceResult<Notice>
where
    R: MemberWriter + ?Sized,
{
    ensure_master_admin(session)?;
    let updates = UpdateMember::try_from(form)?;

    api.update_member(id, &updates).await.map_err(|err| {
        submission_failed(err, "update member", "멤버 정보 수정 중 오류가 발생했습니다")
    })?;

    Ok(Notice::success("멤버 정보가 성공적으로 수정되었습니다"))
}

pub async fn delete_member<R>(
    api: &R,
    session: &SessionContext,
    id: &MemberId,
) -> ServiceResult<Notice>
where
    R: MemberWriter + ?Sized,
{
    ensure_master_admin(session)?;
    api.delete_member(id)
        .await
        .map_err(|err| submission_failed(err, "delete member", "멤버 삭제에 실패했습니다"))?;

    Ok(Notice::success("멤버가 성공적으로 삭제되었습니다"))
}
