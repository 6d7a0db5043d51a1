//! Account page forms: profile rename and password change.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::account::ProfileUpdate;
use crate::forms::member::password_length;
use crate::forms::{FieldErrors, FormError, invalid, is_blank};

#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(custom(function = "validate_profile_name"))]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct PasswordChangeForm {
    #[validate(custom(function = "validate_current_password"))]
    pub current_password: String,
    #[validate(custom(function = "validate_new_password"))]
    pub new_password: String,
    pub confirm_password: String,
}

impl TryFrom<ProfileForm> for ProfileUpdate {
    type Error = FormError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        FieldErrors::of(&form).into_result()?;
        Ok(ProfileUpdate::Name {
            name: form.name.trim().to_string(),
        })
    }
}

impl TryFrom<PasswordChangeForm> for ProfileUpdate {
    type Error = FormError;

    fn try_from(form: PasswordChangeForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::of(&form);
        if form.confirm_password.is_empty() {
            errors.insert("confirm_password", "새 비밀번호를 다시 입력해주세요");
        } else if form.confirm_password != form.new_password {
            errors.insert("confirm_password", "비밀번호가 일치하지 않습니다");
        }
        errors.into_result()?;

        Ok(ProfileUpdate::Password {
            current_password: form.current_password,
            new_password: form.new_password,
        })
    }
}

fn validate_profile_name(name: &str) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(invalid("required", "이름은 필수 항목입니다"));
    }
    Ok(())
}

fn validate_current_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(invalid("required", "현재 비밀번호를 입력해주세요"));
    }
    Ok(())
}

fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(invalid("required", "새 비밀번호를 입력해주세요"));
    }
    password_length(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_change_serializes_camel_case() {
        let form = PasswordChangeForm {
            current_password: "oldpass".to_string(),
            new_password: "newpass1".to_string(),
            confirm_password: "newpass1".to_string(),
        };

        let update = ProfileUpdate::try_from(form).unwrap();

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"currentPassword": "oldpass", "newPassword": "newpass1"})
        );
    }

    #[test]
    fn password_change_requires_every_field() {
        match ProfileUpdate::try_from(PasswordChangeForm::default()) {
            Err(FormError::Fields(errors)) => {
                assert_eq!(
                    errors.get("current_password"),
                    Some("현재 비밀번호를 입력해주세요")
                );
                assert_eq!(errors.get("new_password"), Some("새 비밀번호를 입력해주세요"));
                assert_eq!(
                    errors.get("confirm_password"),
                    Some("새 비밀번호를 다시 입력해주세요")
                );
            }
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn blank_profile_name_is_rejected() {
        let result = ProfileUpdate::try_from(ProfileForm {
            name: " ".to_string(),
        });
        assert!(matches!(
            result,
            Err(FormError::Fields(e)) if e.get("name") == Some("이름은 필수 항목입니다")
        ));
    }
}
