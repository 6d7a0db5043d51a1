//! Sign-in and the account page of the signed-in administrator.

use crate::api::AccountApi;
use crate::domain::account::{AdminProfile, Credentials, ProfileUpdate};
use crate::forms::account::{PasswordChangeForm, ProfileForm};
use crate::services::{Notice, ServiceError, ServiceResult, submission_failed};
use crate::session::SessionContext;

/// Exchanges credentials for a session.
pub async fn login<R>(api: &R, credentials: Credentials) -> ServiceResult<SessionContext>
where
    R: AccountApi + ?Sized,
{
    let response = api
        .admin_login(&credentials)
        .await
        .map_err(|err| submission_failed(err, "log in", "로그인에 실패했습니다"))?;

    let session = SessionContext::from_login(response).map_err(|err| {
        log::error!("Failed to open session for {}: {err}", credentials.email);
        ServiceError::Api("로그인에 실패했습니다".to_string())
    })?;

    log::info!("Signed in as {}", session.user().email);
    Ok(session)
}

pub async fn load_profile<R>(api: &R) -> ServiceResult<AdminProfile>
where
    R: AccountApi + ?Sized,
{
    api.admin_profile().await.map_err(|err| {
        submission_failed(err, "load profile", "사용자 정보를 불러오는데 실패했습니다")
    })
}

/// Renames the administrator and refreshes the cached profile in `session`.
pub async fn update_profile<R>(
    api: &R,
    session: &mut SessionContext,
    form: ProfileForm,
) -> ServiceResult<Notice>
where
    R: AccountApi + ?Sized,
{
    let update = ProfileUpdate::try_from(form)?;

    api.update_admin_profile(&update).await.map_err(|err| {
        submission_failed(err, "update profile", "프로필 수정 중 오류가 발생했습니다")
    })?;

    if let ProfileUpdate::Name { name } = update {
        let mut user = session.user().clone();
        user.name = name;
        session.set_user(user);
    }

    Ok(Notice::success("프로필이 성공적으로 수정되었습니다"))
}

pub async fn change_password<R>(api: &R, form: PasswordChangeForm) -> ServiceResult<Notice>
where
    R: AccountApi + ?Sized,
{
    let update = ProfileUpdate::try_from(form)?;

    api.update_admin_profile(&update).await.map_err(|err| {
        submission_failed(err, "change password", "비밀번호 변경 중 오류가 발생했습니다")
    })?;

    Ok(Notice::success("비밀번호가 성공적으로 변경되었습니다"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::api::mock::MockApi;
    use crate::domain::account::LoginResponse;
    use crate::domain::types::MemberRole;
    use crate::forms::FormError;

    fn profile(name: &str) -> AdminProfile {
        AdminProfile {
            email: "admin@example.com".to_string(),
            name: name.to_string(),
            role: MemberRole::MasterAdmin,
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "admin@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn login_opens_session() {
        let mut api = MockApi::new();
        api.expect_admin_login().times(1).returning(|_| {
            Ok(LoginResponse {
                token: "jwt".to_string(),
                user: profile("관리자"),
            })
        });

        let session = login(&api, credentials()).await.unwrap();

        assert_eq!(session.token(), "jwt");
        assert!(session.is_master_admin());
    }

    #[tokio::test]
    async fn login_without_token_fails() {
        let mut api = MockApi::new();
        api.expect_admin_login().times(1).returning(|_| {
            Ok(LoginResponse {
                token: " ".to_string(),
                user: profile("관리자"),
            })
        });

        let result = login(&api, credentials()).await;

        assert_eq!(result, Err(ServiceError::Api("로그인에 실패했습니다".to_string())));
    }

    #[tokio::test]
    async fn wrong_password_message_comes_from_server() {
        let mut api = MockApi::new();
        api.expect_admin_login().times(1).returning(|_| {
            Err(ApiError::Rejected {
                status: 401,
                message: Some("이메일 또는 비밀번호가 올바르지 않습니다".to_string()),
            })
        });

        let result = login(&api, credentials()).await;

        assert_eq!(
            result,
            Err(ServiceError::Api(
                "이메일 또는 비밀번호가 올바르지 않습니다".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn rename_updates_cached_profile() {
        let mut api = MockApi::new();
        api.expect_update_admin_profile()
            .withf(|update| matches!(update, ProfileUpdate::Name { name } if name == "새 이름"))
            .times(1)
            .returning(|_| Ok(()));

        let mut session = SessionContext::new("jwt", profile("관리자")).unwrap();
        let form = ProfileForm {
            name: " 새 이름 ".to_string(),
        };
        let notice = update_profile(&api, &mut session, form).await.unwrap();

        assert_eq!(notice, Notice::success("프로필이 성공적으로 수정되었습니다"));
        assert_eq!(session.user().name, "새 이름");
    }

    #[tokio::test]
    async fn password_change_falls_back_on_empty_error_body() {
        let mut api = MockApi::new();
        api.expect_update_admin_profile().times(1).returning(|_| {
            Err(ApiError::Rejected {
                status: 500,
                message: None,
            })
        });

        let form = PasswordChangeForm {
            current_password: "secret1".to_string(),
            new_password: "secret2".to_string(),
            confirm_password: "secret2".to_string(),
        };
        let result = change_password(&api, form).await;

        assert_eq!(
            result,
            Err(ServiceError::Api("비밀번호 변경 중 오류가 발생했습니다".to_string()))
        );
    }

    #[tokio::test]
    async fn mismatched_confirmation_never_reaches_the_server() {
        let mut api = MockApi::new();
        api.expect_update_admin_profile().never();

        let form = PasswordChangeForm {
            current_password: "secret1".to_string(),
            new_password: "secret2".to_string(),
            confirm_password: "secret3".to_string(),
        };
        let result = change_password(&api, form).await;

        assert!(matches!(result, Err(ServiceError::Form(FormError::Fields(_)))));
    }
}
