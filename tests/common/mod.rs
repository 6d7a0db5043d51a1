//! Helpers shared by the integration tests.
#![allow(dead_code)]

use raglet_console::api::http::HttpApi;
use raglet_console::domain::account::AdminProfile;
use raglet_console::domain::types::MemberRole;
use raglet_console::session::SessionContext;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn session(role: MemberRole) -> SessionContext {
    SessionContext::new(
        TOKEN,
        AdminProfile {
            email: "admin@campus.ac.kr".to_string(),
            name: "관리자".to_string(),
            role,
        },
    )
    .unwrap()
}

/// Client against `server` signed in as a master admin.
pub fn api(server: &MockServer) -> HttpApi {
    HttpApi::new(&server.uri())
        .unwrap()
        .with_session(&session(MemberRole::MasterAdmin))
}

pub fn campus_json(id: &str, name: &str, is_default: bool) -> Value {
    json!({
        "_id": id,
        "name": name,
        "displayName": format!("{name} 캠퍼스"),
        "collectionName": format!("{name}_qa"),
        "status": "ACTIVE",
        "isDefault": is_default,
        "createdAt": "2024-03-01T09:00:00.000Z"
    })
}

pub fn question_json(id: &str, campus: &str) -> Value {
    json!({
        "_id": id,
        "questionId": 7,
        "title": format!("질문 {id}"),
        "status": "ACTIVE",
        "campusId": {"_id": format!("{campus}-id"), "name": campus},
        "authorId": {"_id": "a1", "email": "author@campus.ac.kr"}
    })
}
