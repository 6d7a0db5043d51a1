mod common;

use raglet_console::api::http::HttpApi;
use raglet_console::api::{
    AccountApi, ApiError, CampusFilters, CampusReader, CampusWriter, ImageFile, QuestionReader,
    QuestionWriter, SuggestedQuestionFilters, SuggestedQuestionReader, SuggestedQuestionWriter,
    UploadApi,
};
use raglet_console::domain::account::Credentials;
use raglet_console::domain::types::{CampusId, EntityStatus, QuestionId, SuggestedQuestionId};
use raglet_console::listing::{Filter, ListQuery, PageLimit};
use serde_json::json;
use wiremock::matchers::{
    body_json, header, header_regex, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{TOKEN, api, campus_json, init_logging, question_json};

#[tokio::test]
async fn list_campuses_sends_bearer_token_and_filters() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/campuses"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(query_param("page", "2"))
        .and(query_param("limit", "20"))
        .and(query_param("search", "seoul"))
        .and(query_param_is_missing("status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campuses": [campus_json("c1", "seoul", true)],
            "pagination": {"total": 21, "page": 2, "pages": 2, "limit": 20}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery {
        page: 2,
        limit: PageLimit::Twenty,
        filters: CampusFilters {
            search: Filter::text("seoul"),
            status: Filter::Any,
        },
    };
    let page = api(&server).list_campuses(&query).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "seoul");
    assert_eq!(page.pagination.total, 21);
    assert_eq!(page.pagination.pages, Some(2));
}

#[tokio::test]
async fn rejected_request_carries_server_message() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/campuses/c1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "기본 캠퍼스는 삭제할 수 없습니다"
        })))
        .mount(&server)
        .await;

    let err = api(&server)
        .delete_campus(&CampusId::new("c1").unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Rejected {
            status: 400,
            message: Some("기본 캠퍼스는 삭제할 수 없습니다".to_string()),
        }
    );
}

#[tokio::test]
async fn rejected_request_without_body_has_no_message() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/campuses/c1/set-default"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api(&server)
        .set_default_campus(&CampusId::new("c1").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.server_message(), None);
    assert_eq!(
        err.list_message("기본 캠퍼스 설정에 실패했습니다"),
        "기본 캠퍼스 설정에 실패했습니다"
    );
}

#[tokio::test]
async fn active_campuses_are_requested_by_status() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/campuses"))
        .and(query_param("status", "ACTIVE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campuses": [campus_json("c1", "seoul", true), campus_json("c2", "busan", false)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let campuses = api(&server).list_active_campuses().await.unwrap();

    assert_eq!(campuses.len(), 2);
}

#[tokio::test]
async fn question_status_is_addressed_by_campus_name() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/questions/status/q1/seoul"))
        .and(body_json(json!({"status": "INACTIVE"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    api(&server)
        .update_question_status(&QuestionId::new("q1").unwrap(), "seoul", EntityStatus::Inactive)
        .await
        .unwrap();
}

#[tokio::test]
async fn question_detail_and_authors_decode() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/questions/q1/seoul"))
        .respond_with(ResponseTemplate::new(200).set_body_json(question_json("q1", "seoul")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/questions/authors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authors": [{"id": "a1", "name": "김교수"}]
        })))
        .mount(&server)
        .await;

    let api = api(&server);
    let question = api
        .get_question(&QuestionId::new("q1").unwrap(), "seoul")
        .await
        .unwrap();
    let authors = api.list_authors().await.unwrap();

    assert_eq!(question.question_id.as_deref(), Some("7"));
    assert_eq!(question.author_label(), "author@campus.ac.kr");
    assert_eq!(authors[0].name, "김교수");
}

#[tokio::test]
async fn suggested_question_total_falls_back_to_row_count() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/suggested-questions"))
        .and(query_param("isActive", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "s1", "question": "수강신청 기간은 언제인가요?", "isActive": true},
                {"_id": "s2", "question": "기숙사 신청 방법은?", "isActive": true}
            ]
        })))
        .mount(&server)
        .await;

    let query = ListQuery::new(SuggestedQuestionFilters {
        is_active: Filter::Only(true),
    });
    let page = api(&server).list_suggested_questions(&query).await.unwrap();

    assert_eq!(page.pagination.total, 2);
    assert_eq!(page.pagination.pages, None);
}

#[tokio::test]
async fn suggested_question_toggle_sends_is_active() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/suggested-questions/status/s1"))
        .and(body_json(json!({"isActive": false})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    api(&server)
        .update_suggested_question_status(&SuggestedQuestionId::new("s1").unwrap(), false)
        .await
        .unwrap();
}

#[tokio::test]
async fn login_works_without_session() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/auth/login"))
        .and(body_json(json!({"email": "admin@campus.ac.kr", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt",
            "user": {"email": "admin@campus.ac.kr", "name": "관리자", "role": "MASTER_ADMIN"}
        })))
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri()).unwrap();
    let response = api
        .admin_login(&Credentials {
            email: "admin@campus.ac.kr".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.token, "jwt");
}

#[tokio::test]
async fn image_upload_is_multipart() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/upload/upload"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"imageId": "img-1.png"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let image_id = api(&server)
        .upload_image(&ImageFile {
            file_name: "campus.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        })
        .await
        .unwrap();

    assert_eq!(image_id.as_str(), "img-1.png");
}

#[tokio::test]
async fn transport_failure_is_not_a_rejection() {
    init_logging();
    // Nothing listens on the discard port.
    let api = HttpApi::new("http://127.0.0.1:9").unwrap();

    let err = api.list_authors().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn create_question_returns_number() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/questions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"questionId": 42})))
        .mount(&server)
        .await;

    let question = raglet_console::domain::question::NewQuestion {
        title: "졸업 요건".to_string(),
        content: "졸업 학점은?".to_string(),
        status: EntityStatus::Active,
        campus_id: CampusId::new("c1").unwrap(),
        tags: vec![],
        image_ids: vec![],
    };
    let number = api(&server).create_question(&question).await.unwrap();

    assert_eq!(number, "42");
}
