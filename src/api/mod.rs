//! Typed access to the collaborator REST API.
//!
//! Each resource is split into a reader and a writer trait so page services
//! can state exactly which calls they need. [`http::HttpApi`] implements all of
//! them over HTTP; [`mock`] provides `mockall` doubles for tests.

use async_trait::async_trait;

use crate::domain::account::{AdminProfile, Credentials, LoginResponse, ProfileUpdate};
use crate::domain::campus::{Campus, NewCampus, UpdateCampus};
use crate::domain::member::{Member, NewMember, UpdateMember};
use crate::domain::question::{Author, NewQuestion, Question, UpdateQuestion};
use crate::domain::suggested_question::{SuggestedQuestion, SuggestedQuestionPayload};
use crate::domain::types::{
    AuthorId, CampusId, EntityStatus, ImageId, MemberId, MemberRole, QuestionId,
    SuggestedQuestionId,
};
use crate::listing::{Filter, FilterSet, ListPage, ListQuery, QueryParams};

pub mod errors;
#[cfg(feature = "client")]
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod wire;

pub use errors::{ApiError, ApiResult};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampusFilters {
    pub search: Filter<String>,
    pub status: Filter<EntityStatus>,
}

impl FilterSet for CampusFilters {
    fn append_params(&self, params: &mut QueryParams) {
        params.push_filter("search", &self.search);
        params.push_filter("status", &self.status);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionFilters {
    pub search: Filter<String>,
    pub author: Filter<AuthorId>,
    pub status: Filter<EntityStatus>,
    pub campus: Filter<CampusId>,
}

impl FilterSet for QuestionFilters {
    fn append_params(&self, params: &mut QueryParams) {
        params.push_filter("search", &self.search);
        params.push_filter("authorId", &self.author);
        params.push_filter("status", &self.status);
        params.push_filter("campusId", &self.campus);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberFilters {
    pub role: Filter<MemberRole>,
    pub status: Filter<EntityStatus>,
}

impl FilterSet for MemberFilters {
    fn append_params(&self, params: &mut QueryParams) {
        params.push_filter("role", &self.role);
        params.push_filter("status", &self.status);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestedQuestionFilters {
    pub is_active: Filter<bool>,
}

impl FilterSet for SuggestedQuestionFilters {
    fn append_params(&self, params: &mut QueryParams) {
        params.push_filter("isActive", &self.is_active);
    }
}

pub type CampusListQuery = ListQuery<CampusFilters>;
pub type QuestionListQuery = ListQuery<QuestionFilters>;
pub type MemberListQuery = ListQuery<MemberFilters>;
pub type SuggestedQuestionListQuery = ListQuery<SuggestedQuestionFilters>;

/// Image picked for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait CampusReader {
    async fn list_campuses(&self, query: &CampusListQuery) -> ApiResult<ListPage<Campus>>;
    /// Active campuses for pickers; uses the collaborator's default window.
    async fn list_active_campuses(&self) -> ApiResult<Vec<Campus>>;
    async fn get_campus(&self, id: &CampusId) -> ApiResult<Campus>;
}

#[async_trait]
pub trait CampusWriter {
    async fn create_campus(&self, campus: &NewCampus) -> ApiResult<()>;
    async fn update_campus(&self, id: &CampusId, updates: &UpdateCampus) -> ApiResult<()>;
    async fn delete_campus(&self, id: &CampusId) -> ApiResult<()>;
    /// Marks the campus as default; the collaborator clears the flag elsewhere.
    async fn set_default_campus(&self, id: &CampusId) -> ApiResult<()>;
}

#[async_trait]
pub trait QuestionReader {
    async fn list_questions(&self, query: &QuestionListQuery) -> ApiResult<ListPage<Question>>;
    async fn get_question(&self, id: &QuestionId, campus_name: &str) -> ApiResult<Question>;
    async fn list_authors(&self) -> ApiResult<Vec<Author>>;
}

#[async_trait]
pub trait QuestionWriter {
    /// Returns the public question number assigned by the collaborator.
    async fn create_question(&self, question: &NewQuestion) -> ApiResult<String>;
    async fn update_question(
        &self,
        id: &QuestionId,
        campus_name: &str,
        updates: &UpdateQuestion,
    ) -> ApiResult<()>;
    async fn update_question_status(
        &self,
        id: &QuestionId,
        campus_name: &str,
        status: EntityStatus,
    ) -> ApiResult<()>;
    async fn delete_question(&self, id: &QuestionId, campus_name: &str) -> ApiResult<()>;
}

#[async_trait]
pub trait MemberReader {
    async fn list_members(&self, query: &MemberListQuery) -> ApiResult<ListPage<Member>>;
    async fn get_member(&self, id: &MemberId) -> ApiResult<Member>;
}

#[async_trait]
pub trait MemberWriter {
    async fn create_member(&self, member: &NewMember) -> ApiResult<()>;
    async fn update_member(&self, id: &MemberId, updates: &UpdateMember) -> ApiResult<()>;
    async fn delete_member(&self, id: &MemberId) -> ApiResult<()>;
}

#[async_trait]
pub trait SuggestedQuestionReader {
    async fn list_suggested_questions(
        &self,
        query: &SuggestedQuestionListQuery,
    ) -> ApiResult<ListPage<SuggestedQuestion>>;
    async fn get_suggested_question(
        &self,
        id: &SuggestedQuestionId,
    ) -> ApiResult<SuggestedQuestion>;
}

#[async_trait]
pub trait SuggestedQuestionWriter {
    async fn create_suggested_question(
        &self,
        payload: &SuggestedQuestionPayload,
    ) -> ApiResult<()>;
    async fn update_suggested_question(
        &self,
        id: &SuggestedQuestionId,
        payload: &SuggestedQuestionPayload,
    ) -> ApiResult<()>;
    async fn update_suggested_question_status(
        &self,
        id: &SuggestedQuestionId,
        is_active: bool,
    ) -> ApiResult<()>;
    async fn delete_suggested_question(&self, id: &SuggestedQuestionId) -> ApiResult<()>;
}

#[async_trait]
pub trait AccountApi {
    async fn admin_login(&self, credentials: &Credentials) -> ApiResult<LoginResponse>;
    async fn admin_profile(&self) -> ApiResult<AdminProfile>;
    async fn update_admin_profile(&self, update: &ProfileUpdate) -> ApiResult<()>;
}

#[async_trait]
pub trait UploadApi {
    async fn upload_image(&self, file: &ImageFile) -> ApiResult<ImageId>;
    async fn delete_image(&self, file_name: &str) -> ApiResult<()>;
}
