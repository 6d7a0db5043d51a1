//! `reqwest` implementation of the API traits.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::wire::{
    AuthorList, CampusEnvelope, CampusList, CreatedQuestion, DataEnvelope, ErrorBody,
    MemberEnvelope, MemberList, QuestionList, SuggestedQuestionList, UploadedImage,
};
use crate::api::{
    AccountApi, ApiError, ApiResult, CampusListQuery, CampusReader, CampusWriter, ImageFile,
    MemberListQuery, MemberReader, MemberWriter, QuestionListQuery, QuestionReader,
    QuestionWriter, SuggestedQuestionListQuery, SuggestedQuestionReader, SuggestedQuestionWriter,
    UploadApi,
};
use crate::domain::account::{AdminProfile, Credentials, LoginResponse, ProfileUpdate};
use crate::domain::campus::{Campus, NewCampus, UpdateCampus};
use crate::domain::member::{Member, NewMember, UpdateMember};
use crate::domain::question::{Author, NewQuestion, Question, UpdateQuestion};
use crate::domain::suggested_question::{SuggestedQuestion, SuggestedQuestionPayload};
use crate::domain::types::{
    CampusId, EntityStatus, ImageId, MemberId, QuestionId, SuggestedQuestionId,
};
use crate::listing::{ListPage, QueryParams};
use crate::session::SessionContext;

/// Client for the admin API rooted at `{base_url}/api/admin`.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpApi {
    /// Creates a client without a session; only the login endpoint will succeed.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Unexpected(format!("invalid api base url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Unexpected(format!(
                "api base url {base_url} cannot carry a path"
            )));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            token: None,
        })
    }

    /// Attaches the session whose token authorizes every request.
    #[must_use]
    pub fn with_session(mut self, session: &SessionContext) -> Self {
        self.token = Some(session.token().to_string());
        self
    }

    pub fn set_session(&mut self, session: Option<&SessionContext>) {
        self.token = session.map(|session| session.token().to_string());
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Unexpected(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "admin"])
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message);
        log::warn!("Request rejected with status {status}: {message:?}");

        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn read<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(ApiError::from)
    }

    async fn execute(&self, request: RequestBuilder) -> ApiResult<()> {
        self.send(request).await.map(|_| ())
    }

    fn get(&self, segments: &[&str], params: Option<&QueryParams>) -> ApiResult<RequestBuilder> {
        let request = self.client.get(self.endpoint(segments)?);
        Ok(match params {
            Some(params) => request.query(params.as_slice()),
            None => request,
        })
    }
}

#[async_trait]
impl CampusReader for HttpApi {
    async fn list_campuses(&self, query: &CampusListQuery) -> ApiResult<ListPage<Campus>> {
        let request = self.get(&["campuses"], Some(&query.to_params()))?;
        self.read::<CampusList>(request).await.map(ListPage::from)
    }

    async fn list_active_campuses(&self) -> ApiResult<Vec<Campus>> {
        let mut params = QueryParams::new();
        params.push("status", EntityStatus::Active.as_str());
        let request = self.get(&["campuses"], Some(&params))?;
        self.read::<CampusList>(request)
            .await
            .map(|list| list.campuses)
    }

    async fn get_campus(&self, id: &CampusId) -> ApiResult<Campus> {
        let request = self.get(&["campuses", id.as_str()], None)?;
        self.read::<CampusEnvelope>(request)
            .await
            .map(|envelope| envelope.campus)
    }
}

#[async_trait]
impl CampusWriter for HttpApi {
    async fn create_campus(&self, campus: &NewCampus) -> ApiResult<()> {
        let url = self.endpoint(&["campuses"])?;
        self.execute(self.client.post(url).json(campus)).await
    }

    async fn update_campus(&self, id: &CampusId, updates: &UpdateCampus) -> ApiResult<()> {
        let url = self.endpoint(&["campuses", id.as_str()])?;
        self.execute(self.client.put(url).json(updates)).await
    }

    async fn delete_campus(&self, id: &CampusId) -> ApiResult<()> {
        let url = self.endpoint(&["campuses", id.as_str()])?;
        self.execute(self.client.delete(url)).await
    }

    async fn set_default_campus(&self, id: &CampusId) -> ApiResult<()> {
        let url = self.endpoint(&["campuses", id.as_str(), "set-default"])?;
        self.execute(self.client.patch(url)).await
    }
}

#[async_trait]
impl QuestionReader for HttpApi {
    async fn list_questions(&self, query: &QuestionListQuery) -> ApiResult<ListPage<Question>> {
        let request = self.get(&["questions"], Some(&query.to_params()))?;
        self.read::<QuestionList>(request).await.map(ListPage::from)
    }

    async fn get_question(&self, id: &QuestionId, campus_name: &str) -> ApiResult<Question> {
        let request = self.get(&["questions", id.as_str(), campus_name], None)?;
        self.read(request).await
    }

    async fn list_authors(&self) -> ApiResult<Vec<Author>> {
        let request = self.get(&["questions", "authors"], None)?;
        self.read::<AuthorList>(request)
            .await
            .map(|list| list.authors)
    }
}

#[async_trait]
impl QuestionWriter for HttpApi {
    async fn create_question(&self, question: &NewQuestion) -> ApiResult<String> {
        let url = self.endpoint(&["questions"])?;
        self.read::<CreatedQuestion>(self.client.post(url).json(question))
            .await
            .map(|created| created.question_id)
    }

    async fn update_question(
        &self,
        id: &QuestionId,
        campus_name: &str,
        updates: &UpdateQuestion,
    ) -> ApiResult<()> {
        let url = self.endpoint(&["questions", id.as_str(), campus_name])?;
        self.execute(self.client.put(url).json(updates)).await
    }

    async fn update_question_status(
        &self,
        id: &QuestionId,
        campus_name: &str,
        status: EntityStatus,
    ) -> ApiResult<()> {
        let url = self.endpoint(&["questions", "status", id.as_str(), campus_name])?;
        self.execute(self.client.patch(url).json(&json!({ "status": status })))
            .await
    }

    async fn delete_question(&self, id: &QuestionId, campus_name: &str) -> ApiResult<()> {
        let url = self.endpoint(&["questions", id.as_str(), campus_name])?;
        self.execute(self.client.delete(url)).await
    }
}

#[async_trait]
impl MemberReader for HttpApi {
    async fn list_members(&self, query: &MemberListQuery) -> ApiResult<ListPage<Member>> {
        let request = self.get(&["users"], Some(&query.to_params()))?;
        self.read::<MemberList>(request).await.map(ListPage::from)
    }

    async fn get_member(&self, id: &MemberId) -> ApiResult<Member> {
        let request = self.get(&["users", id.as_str()], None)?;
        self.read::<MemberEnvelope>(request)
            .await
            .map(|envelope| envelope.user)
    }
}

#[async_trait]
impl MemberWriter for HttpApi {
    async fn create_member(&self, member: &NewMember) -> ApiResult<()> {
        let url = self.endpoint(&["users"])?;
        self.execute(self.client.post(url).json(member)).await
    }

    async fn update_member(&self, id: &MemberId, updates: &UpdateMember) -> ApiResult<()> {
        let url = self.endpoint(&["users", id.as_str()])?;
        self.execute(self.client.put(url).json(updates)).await
    }

    async fn delete_member(&self, id: &MemberId) -> ApiResult<()> {
        let url = self.endpoint(&["users", id.as_str()])?;
        self.execute(self.client.delete(url)).await
    }
}

#[async_trait]
impl SuggestedQuestionReader for HttpApi {
    async fn list_suggested_questions(
        &self,
        query: &SuggestedQuestionListQuery,
    ) -> ApiResult<ListPage<SuggestedQuestion>> {
        let request = self.get(&["suggested-questions"], Some(&query.to_params()))?;
        self.read::<SuggestedQuestionList>(request)
            .await
            .map(ListPage::from)
    }

    async fn get_suggested_question(
        &self,
        id: &SuggestedQuestionId,
    ) -> ApiResult<SuggestedQuestion> {
        let request = self.get(&["suggested-questions", id.as_str()], None)?;
        self.read::<DataEnvelope<SuggestedQuestion>>(request)
            .await
            .map(|envelope| envelope.data)
    }
}

#[async_trait]
impl SuggestedQuestionWriter for HttpApi {
    async fn create_suggested_question(
        &self,
        payload: &SuggestedQuestionPayload,
    ) -> ApiResult<()> {
        let url = self.endpoint(&["suggested-questions"])?;
        self.execute(self.client.post(url).json(payload)).await
    }

    async fn update_suggested_question(
        &self,
        id: &SuggestedQuestionId,
        payload: &SuggestedQuestionPayload,
    ) -> ApiResult<()> {
        let url = self.endpoint(&["suggested-questions", id.as_str()])?;
        self.execute(self.client.put(url).json(payload)).await
    }

    async fn update_suggested_question_status(
        &self,
        id: &SuggestedQuestionId,
        is_active: bool,
    ) -> ApiResult<()> {
        let url = self.endpoint(&["suggested-questions", "status", id.as_str()])?;
        self.execute(self.client.patch(url).json(&json!({ "isActive": is_active })))
            .await
    }

    async fn delete_suggested_question(&self, id: &SuggestedQuestionId) -> ApiResult<()> {
        let url = self.endpoint(&["suggested-questions", id.as_str()])?;
        self.execute(self.client.delete(url)).await
    }
}

#[async_trait]
impl AccountApi for HttpApi {
    async fn admin_login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let url = self.endpoint(&["auth", "login"])?;
        self.read(self.client.post(url).json(credentials)).await
    }

    async fn admin_profile(&self) -> ApiResult<AdminProfile> {
        let request = self.get(&["auth", "me"], None)?;
        self.read(request).await
    }

    async fn update_admin_profile(&self, update: &ProfileUpdate) -> ApiResult<()> {
        let url = self.endpoint(&["auth", "me"])?;
        self.execute(self.client.put(url).json(update)).await
    }
}

#[async_trait]
impl UploadApi for HttpApi {
    async fn upload_image(&self, file: &ImageFile) -> ApiResult<ImageId> {
        let url = self.endpoint(&["upload", "upload"])?;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part("image", part);
        self.read::<DataEnvelope<UploadedImage>>(self.client.post(url).multipart(form))
            .await
            .map(|envelope| envelope.data.image_id)
    }

    async fn delete_image(&self, file_name: &str) -> ApiResult<()> {
        let url = self.endpoint(&["upload", "delete", file_name])?;
        self.execute(self.client.delete(url)).await
    }
}
