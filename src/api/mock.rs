//! Mock API implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::api::{
    AccountApi, ApiResult, CampusListQuery, CampusReader, CampusWriter, ImageFile,
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
use crate::listing::ListPage;

mock! {
    pub Api {}

    #[async_trait]
    impl CampusReader for Api {
        async fn list_campuses(&self, query: &CampusListQuery) -> ApiResult<ListPage<Campus>>;
        async fn list_active_campuses(&self) -> ApiResult<Vec<Campus>>;
        async fn get_campus(&self, id: &CampusId) -> ApiResult<Campus>;
    }

    #[async_trait]
    impl CampusWriter for Api {
        async fn create_campus(&self, campus: &NewCampus) -> ApiResult<()>;
        async fn update_campus(&self, id: &CampusId, updates: &UpdateCampus) -> ApiResult<()>;
        async fn delete_campus(&self, id: &CampusId) -> ApiResult<()>;
        async fn set_default_campus(&self, id: &CampusId) -> ApiResult<()>;
    }

    #[async_trait]
    impl QuestionReader for Api {
        async fn list_questions(&self, query: &QuestionListQuery) -> ApiResult<ListPage<Question>>;
        async fn get_question(&self, id: &QuestionId, campus_name: &str) -> ApiResult<Question>;
        async fn list_authors(&self) -> ApiResult<Vec<Author>>;
    }

    #[async_trait]
    impl QuestionWriter for Api {
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
    impl MemberReader for Api {
        async fn list_members(&self, query: &MemberListQuery) -> ApiResult<ListPage<Member>>;
        async fn get_member(&self, id: &MemberId) -> ApiResult<Member>;
    }

    #[async_trait]
    impl MemberWriter for Api {
        async fn create_member(&self, member: &NewMember) -> ApiResult<()>;
        async fn update_member(&self, id: &MemberId, updates: &UpdateMember) -> ApiResult<()>;
        async fn delete_member(&self, id: &MemberId) -> ApiResult<()>;
    }

    #[async_trait]
    impl SuggestedQuestionReader for Api {
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
    impl SuggestedQuestionWriter for Api {
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
    impl AccountApi for Api {
        async fn admin_login(&self, credentials: &Credentials) -> ApiResult<LoginResponse>;
        async fn admin_profile(&self) -> ApiResult<AdminProfile>;
        async fn update_admin_profile(&self, update: &ProfileUpdate) -> ApiResult<()>;
    }

    #[async_trait]
    impl UploadApi for Api {
        async fn upload_image(&self, file: &ImageFile) -> ApiResult<ImageId>;
        async fn delete_image(&self, file_name: &str) -> ApiResult<()>;
    }
}
