//! Question list page, question add/edit workflows and image uploads.

use futures::future::try_join_all;

use crate::api::{
    CampusReader, ImageFile, QuestionFilters, QuestionReader, QuestionWriter, UploadApi,
};
use crate::domain::question::{NewQuestion, Question, UpdateQuestion};
use crate::domain::types::{AuthorId, CampusId, EntityStatus, QuestionId};
use crate::dto::questions::{QuestionFilterOptions, QuestionKey};
use crate::dto::table::{TableAction, TableView};
use crate::forms::question::{AddQuestionForm, EditQuestionForm, ImageSet, is_accepted_image};
use crate::listing::{FetchTicket, Filter, ListController, PageLimit, PagesSource, SyncOutcome};
use crate::services::{
    Notice, PageEffect, ServiceError, ServiceResult, row_action_failed, submission_failed,
};

pub const LOAD_ERROR: &str = "질문 목록을 불러오는데 실패했습니다";
const AUTHORS_ERROR: &str = "작성자 목록을 불러오는데 실패했습니다";
const CAMPUSES_ERROR: &str = "캠퍼스 목록을 불러오는데 실패했습니다";

pub type QuestionTicket = FetchTicket<QuestionFilters>;

/// State of the question list page.
#[derive(Debug)]
pub struct QuestionsPage {
    list: ListController<QuestionFilters, Question>,
    options: QuestionFilterOptions,
    /// Set by a failed option load; list loads never clear it.
    options_error: Option<String>,
}

impl Default for QuestionsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionsPage {
    pub fn new() -> Self {
        Self {
            list: ListController::new(PagesSource::Server, LOAD_ERROR),
            options: QuestionFilterOptions::default(),
            options_error: None,
        }
    }

    pub fn list(&self) -> &ListController<QuestionFilters, Question> {
        &self.list
    }

    pub fn options(&self) -> &QuestionFilterOptions {
        &self.options
    }

    /// Error banner of the page: the list error first, then an option error.
    pub fn error(&self) -> Option<&str> {
        self.list.error().or(self.options_error.as_deref())
    }

    pub fn view(&self) -> TableView<QuestionKey> {
        TableView::from_parts(
            self.list.rows(),
            self.list.is_loading(),
            self.error(),
            self.list.pagination(),
        )
    }

    pub fn mount(&mut self) -> QuestionTicket {
        self.list.mount()
    }

    /// Fills the author and campus drop-downs.
    ///
    /// Runs beside the list request; failures set the page error but leave
    /// the loading flag alone. The error outlives later list loads.
    pub async fn load_options<R>(&mut self, api: &R)
    where
        R: QuestionReader + CampusReader + ?Sized,
    {
        let (authors, campuses) = futures::join!(api.list_authors(), api.list_active_campuses());

        self.options_error = None;
        match authors {
            Ok(authors) => self.options.authors = authors,
            Err(err) => {
                log::error!("Failed to load question authors: {err}");
                self.options_error = Some(err.list_message(AUTHORS_ERROR));
            }
        }
        match campuses {
            Ok(campuses) => self.options.campuses = campuses,
            Err(err) => {
                log::error!("Failed to load campus options: {err}");
                self.options_error = Some(err.list_message(CAMPUSES_ERROR));
            }
        }
    }

    pub fn set_search(&mut self, text: &str) -> Option<QuestionTicket> {
        self.list.update_filters(|f| f.search = Filter::text(text))
    }

    pub fn set_author(&mut self, author: Filter<AuthorId>) -> Option<QuestionTicket> {
        self.list.update_filters(|f| f.author = author)
    }

    pub fn set_status(&mut self, status: Filter<EntityStatus>) -> Option<QuestionTicket> {
        self.list.update_filters(|f| f.status = status)
    }

    pub fn set_campus(&mut self, campus: Filter<CampusId>) -> Option<QuestionTicket> {
        self.list.update_filters(|f| f.campus = campus)
    }

    pub fn set_page(&mut self, page: u32) -> Option<QuestionTicket> {
        self.list.set_page(page)
    }

    pub fn set_limit(&mut self, limit: PageLimit) -> Option<QuestionTicket> {
        self.list.set_limit(limit)
    }

    pub async fn sync<R>(&mut self, api: &R, ticket: Option<QuestionTicket>) -> Option<SyncOutcome>
    where
        R: QuestionReader + ?Sized,
    {
        self.list
            .run(ticket, |query| async move { api.list_questions(&query).await })
            .await
    }

    pub async fn change_status<R>(
        &mut self,
        api: &R,
        key: &QuestionKey,
        status: EntityStatus,
    ) -> Notice
    where
        R: QuestionWriter + ?Sized,
    {
        match api
            .update_question_status(&key.id, &key.campus_name, status)
            .await
        {
            Ok(()) => {
                self.list.patch_row(
                    |question| question.id == key.id,
                    |question| question.status = status,
                );
                log::info!("Question {} status changed to {status}", key.id);
                Notice::success("질문 상태가 업데이트되었습니다")
            }
            Err(err) => row_action_failed(
                err,
                "update question status",
                "질문 상태를 업데이트하는데 실패했습니다",
            ),
        }
    }

    pub async fn delete<R>(&mut self, api: &R, key: &QuestionKey) -> Notice
    where
        R: QuestionReader + QuestionWriter + ?Sized,
    {
        match api.delete_question(&key.id, &key.campus_name).await {
            Ok(()) => {
                log::info!("Question {} deleted", key.id);
                let ticket = self.list.refresh();
                self.sync(api, Some(ticket)).await;
                Notice::success("질문이 삭제되었습니다")
            }
            Err(err) => row_action_failed(err, "delete question", "질문 삭제에 실패했습니다"),
        }
    }

    pub async fn handle<R>(&mut self, api: &R, action: TableAction<QuestionKey>) -> PageEffect
    where
        R: QuestionReader + QuestionWriter + ?Sized,
    {
        match action {
            TableAction::Edit(key) => PageEffect::Navigate(format!(
                "/questions/edit/{}?campusName={}",
                key.id, key.campus_name
            )),
            TableAction::Delete(key) => PageEffect::Notice(self.delete(api, &key).await),
            TableAction::ChangeStatus(key, status) => {
                PageEffect::Notice(self.change_status(api, &key, status).await)
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

/// Result of a successful question creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedQuestion {
    /// Public question number assigned by the collaborator.
    pub question_id: String,
    pub notice: Notice,
}

pub async fn create_question<R>(api: &R, form: AddQuestionForm) -> ServiceResult<CreatedQuestion>
where
    R: QuestionWriter + ?Sized,
{
    let question = NewQuestion::try_from(form)?;

    let question_id = api.create_question(&question).await.map_err(|err| {
        submission_failed(err, "create question", "질문 생성 중 오류가 발생했습니다")
    })?;

    log::info!("Question {question_id} created");
    Ok(CreatedQuestion {
        question_id,
        notice: Notice::success("질문이 성공적으로 생성되었습니다"),
    })
}

pub async fn load_question_form<R>(
    api: &R,
    id: &QuestionId,
    campus_name: &str,
) -> ServiceResult<EditQuestionForm>
where
    R: QuestionReader + ?Sized,
{
    let question = api.get_question(id, campus_name).await.map_err(|err| {
        submission_failed(err, "load question", "질문 상세 정보를 불러오는데 실패했습니다")
    })?;

    Ok(EditQuestionForm::from(&question))
}

pub async fn update_question<R>(
    api: &R,
    id: &QuestionId,
    campus_name: &str,
    form: EditQuestionForm,
) -> ServiceResult<Notice>
where
    R: QuestionWriter + ?Sized,
{
    let updates = UpdateQuestion::try_from(form)?;

    api.update_question(id, campus_name, &updates)
        .await
        .map_err(|err| {
            submission_failed(err, "update question", "질문 수정 중 오류가 발생했습니다")
        })?;

    Ok(Notice::success("질문이 성공적으로 수정되었습니다"))
}

pub async fn delete_question<R>(
    api: &R,
    id: &QuestionId,
    campus_name: &str,
) -> ServiceResult<Notice>
where
    R: QuestionWriter + ?Sized,
{
    api.delete_question(id, campus_name)
        .await
        .map_err(|err| submission_failed(err, "delete question", "질문 삭제에 실패했습니다"))?;

    Ok(Notice::success("질문이 성공적으로 삭제되었습니다"))
}

/// Uploads `files` and appends the returned ids to `images`.
///
/// Nothing is uploaded when a file has an unsupported type or the set would
/// exceed its limit; a failed upload leaves `images` unchanged.
pub async fn upload_images<R>(
    api: &R,
    images: &mut ImageSet,
    files: Vec<ImageFile>,
) -> ServiceResult<Notice>
where
    R: UploadApi + ?Sized,
{
    images.ensure_room(files.len()).map_err(ServiceError::Api)?;
    if files.iter().any(|file| !is_accepted_image(&file.file_name)) {
        return Err(ServiceError::Api(
            "일부 파일이 거부되었습니다. 파일 유형을 확인하고 다시 시도하세요.".to_string(),
        ));
    }

    let ids = try_join_all(files.iter().map(|file| api.upload_image(file)))
        .await
        .map_err(|err| {
            log::error!("Failed to upload images: {err}");
            ServiceError::Api("이미지 업로드에 실패했습니다. 다시 시도해주세요.".to_string())
        })?;

    let count = ids.len();
    images.extend(ids);
    let suffix = if count > 1 { "들" } else { "" };
    Ok(Notice::success(format!(
        "성공적으로 {count}개의 이미지{suffix} 업로드됨"
    )))
}

/// Drops the image at `index` from the form and deletes the stored file.
///
/// The image leaves the form even when the stored file cannot be deleted.
pub async fn discard_image<R>(api: &R, images: &mut ImageSet, index: usize) -> Option<Notice>
where
    R: UploadApi + ?Sized,
{
    let id = images.remove(index)?;
    if let Err(err) = api.delete_image(id.as_str()).await {
        log::error!("Failed to delete image {id}: {err}");
        return Some(Notice::error(err.submission_message("이미지 삭제에 실패했습니다")));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::api::mock::MockApi;
    use crate::domain::campus::Campus;
    use crate::domain::question::{Author, CampusRef};
    use crate::domain::types::ImageId;
    use crate::dto::table::TableRecord;
    use crate::listing::{ListPage, ServerPagination};

    fn question(id: &str, campus: &str) -> Question {
        Question {
            id: QuestionId::new(id).unwrap(),
            question_id: Some(format!("Q-{id}")),
            title: format!("질문 {id}"),
            content: None,
            tags: vec![],
            status: EntityStatus::Active,
            campus: CampusRef {
                id: CampusId::new(format!("{campus}-id")).unwrap(),
                name: campus.to_string(),
                display_name: None,
            },
            author: None,
            image_ids: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    fn page_of(items: Vec<Question>) -> ListPage<Question> {
        ListPage {
            items,
            pagination: ServerPagination {
                total: 2,
                page: Some(1),
                pages: Some(1),
                limit: Some(10),
            },
        }
    }

    fn file(name: &str) -> ImageFile {
        ImageFile {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn filters_are_sent_by_wire_name() {
        let mut api = MockApi::new();
        api.expect_list_questions()
            .withf(|query| {
                let params = query.to_params();
                params.get("authorId") == Some("u7")
                    && params.get("campusId") == Some("c2")
                    && !params.contains("status")
                    && params.get("page") == Some("1")
            })
            .times(1)
            .returning(|_| Ok(page_of(vec![])));

        let mut page = QuestionsPage::new();
        assert!(page.set_author(Filter::Only(AuthorId::new("u7").unwrap())).is_some());
        let ticket = page.set_campus(Filter::Only(CampusId::new("c2").unwrap()));
        page.sync(&api, ticket).await;

        assert!(!page.list().is_loading());
    }

    #[tokio::test]
    async fn option_failures_set_error_without_touching_loading() {
        let mut api = MockApi::new();
        api.expect_list_authors()
            .times(1)
            .returning(|| Ok(vec![Author {
                id: AuthorId::new("u1").unwrap(),
                name: "작성자".to_string(),
            }]));
        api.expect_list_active_campuses()
            .times(1)
            .returning(|| Err(ApiError::Transport("timeout".to_string())));

        let mut page = QuestionsPage::new();
        let _ticket = page.mount();
        page.load_options(&api).await;

        assert_eq!(page.options().authors.len(), 1);
        assert!(page.options().campuses.is_empty());
        assert_eq!(page.error(), Some(CAMPUSES_ERROR));
        assert!(page.list().is_loading());
    }

    #[tokio::test]
    async fn campus_options_keep_server_order() {
        let mut api = MockApi::new();
        api.expect_list_authors().returning(|| Ok(vec![]));
        api.expect_list_active_campuses().returning(|| {
            Ok(vec![Campus {
                id: CampusId::new("c1").unwrap(),
                name: "seoul".to_string(),
                display_name: "서울".to_string(),
                collection_name: None,
                description: None,
                status: EntityStatus::Active,
                is_default: true,
                created_at: None,
            }])
        });

        let mut page = QuestionsPage::new();
        page.load_options(&api).await;

        assert_eq!(page.options().campuses[0].name, "seoul");
        assert_eq!(page.error(), None);
    }

    #[tokio::test]
    async fn option_error_survives_list_load() {
        let mut api = MockApi::new();
        api.expect_list_authors().returning(|| Ok(vec![]));
        api.expect_list_active_campuses()
            .times(1)
            .returning(|| Err(ApiError::Transport("timeout".to_string())));
        api.expect_list_questions()
            .times(1)
            .returning(|_| Ok(page_of(vec![question("q1", "seoul")])));

        let mut page = QuestionsPage::new();
        let ticket = page.mount();
        page.load_options(&api).await;
        let outcome = page.sync(&api, Some(ticket)).await;

        assert_eq!(outcome, Some(SyncOutcome::Replaced));
        assert_eq!(page.list().error(), None);
        assert_eq!(page.error(), Some(CAMPUSES_ERROR));
        assert_eq!(page.view().error.as_deref(), Some(CAMPUSES_ERROR));
        assert_eq!(page.list().rows().len(), 1);
    }

    #[tokio::test]
    async fn list_error_takes_precedence_over_option_error() {
        let mut api = MockApi::new();
        api.expect_list_authors()
            .returning(|| Err(ApiError::Transport("timeout".to_string())));
        api.expect_list_active_campuses().returning(|| Ok(vec![]));
        api.expect_list_questions().times(1).returning(|_| {
            Err(ApiError::Rejected {
                status: 500,
                message: Some("서버 오류".to_string()),
            })
        });

        let mut page = QuestionsPage::new();
        let ticket = page.mount();
        page.load_options(&api).await;
        page.sync(&api, Some(ticket)).await;

        assert_eq!(page.error(), Some("서버 오류"));
    }

    #[tokio::test]
    async fn status_change_uses_campus_name_and_patches_row() {
        let mut api = MockApi::new();
        api.expect_list_questions()
            .times(1)
            .returning(|_| Ok(page_of(vec![question("q1", "seoul"), question("q2", "busan")])));
        api.expect_update_question_status()
            .withf(|id, campus, status| {
                id.as_str() == "q2" && campus == "busan" && *status == EntityStatus::Inactive
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut page = QuestionsPage::new();
        let ticket = page.mount();
        page.sync(&api, Some(ticket)).await;

        let key = page.list().rows()[1].key();
        let effect = page
            .handle(&api, TableAction::ChangeStatus(key, EntityStatus::Inactive))
            .await;

        assert!(matches!(effect, PageEffect::Notice(ref n) if !n.is_error()));
        assert_eq!(page.list().rows()[1].status, EntityStatus::Inactive);
    }

    #[tokio::test]
    async fn edit_navigates_with_campus_name() {
        let api = MockApi::new();
        let mut page = QuestionsPage::new();
        let key = QuestionKey {
            id: QuestionId::new("q1").unwrap(),
            campus_name: "seoul".to_string(),
        };
        assert_eq!(
            page.handle(&api, TableAction::Edit(key)).await,
            PageEffect::Navigate("/questions/edit/q1?campusName=seoul".to_string())
        );
    }

    #[tokio::test]
    async fn create_returns_question_number() {
        let mut api = MockApi::new();
        api.expect_create_question()
            .withf(|question| question.tags == vec!["학사".to_string()])
            .times(1)
            .returning(|_| Ok("128".to_string()));

        let form = AddQuestionForm {
            title: "졸업 요건 문의".to_string(),
            content: "졸업 학점은 몇 학점인가요?".to_string(),
            campus_id: "c1".to_string(),
            tags: "학사,".to_string(),
            ..AddQuestionForm::default()
        };
        let created = create_question(&api, form).await.unwrap();

        assert_eq!(created.question_id, "128");
    }

    #[tokio::test]
    async fn upload_appends_ids_in_order() {
        let mut api = MockApi::new();
        api.expect_upload_image()
            .times(2)
            .returning(|file| Ok(ImageId::new(format!("id-{}", file.file_name)).unwrap()));

        let mut images = ImageSet::default();
        let notice = upload_images(&api, &mut images, vec![file("a.png"), file("b.jpg")])
            .await
            .unwrap();

        assert_eq!(notice.message, "성공적으로 2개의 이미지들 업로드됨");
        let ids: Vec<&str> = images.ids().iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["id-a.png", "id-b.jpg"]);
    }

    #[tokio::test]
    async fn upload_rejects_before_sending() {
        let mut api = MockApi::new();
        api.expect_upload_image().never();

        let mut images = ImageSet::new(
            (0..4)
                .map(|i| ImageId::new(format!("img{i}")).unwrap())
                .collect(),
        );

        let too_many = upload_images(&api, &mut images, vec![file("a.png"), file("b.png")]).await;
        assert!(matches!(too_many, Err(ServiceError::Api(_))));

        let wrong_type = upload_images(&api, &mut images, vec![file("doc.pdf")]).await;
        assert_eq!(
            wrong_type,
            Err(ServiceError::Api(
                "일부 파일이 거부되었습니다. 파일 유형을 확인하고 다시 시도하세요.".to_string()
            ))
        );
        assert_eq!(images.len(), 4);
    }

    #[tokio::test]
    async fn discard_removes_even_when_delete_fails() {
        let mut api = MockApi::new();
        api.expect_delete_image()
            .withf(|name| name == "img1")
            .times(1)
            .returning(|_| Err(ApiError::Transport(String::new())));

        let mut images = ImageSet::new(vec![
            ImageId::new("img0").unwrap(),
            ImageId::new("img1").unwrap(),
        ]);
        let notice = discard_image(&api, &mut images, 1).await;

        assert!(notice.is_some_and(|n| n.is_error()));
        assert_eq!(images.len(), 1);
    }
}
