//! Member add and edit forms.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::member::{Member, NewMember, UpdateMember};
use crate::domain::types::{EntityStatus, MemberRole};
use crate::forms::{FieldErrors, FormError, char_len, invalid, is_blank};

const MIN_PASSWORD: usize = 6;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct AddMemberForm {
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    /// Compared with `password`; never sent.
    pub confirm_password: String,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub status: EntityStatus,
}

/// Edit form; blank fields are left unchanged on the collaborator.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct EditMemberForm {
    #[serde(default)]
    #[validate(custom(function = "validate_optional_name"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_password"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<MemberRole>,
    #[serde(default)]
    pub status: Option<EntityStatus>,
}

impl From<&Member> for EditMemberForm {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            password: String::new(),
            role: Some(member.role),
            status: Some(member.status),
        }
    }
}

impl TryFrom<AddMemberForm> for NewMember {
    type Error = FormError;

    fn try_from(form: AddMemberForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::of(&form);
        if form.confirm_password.is_empty() {
            errors.insert("confirm_password", "비밀번호를 다시 입력해주세요");
        } else if form.confirm_password != form.password {
            errors.insert("confirm_password", "비밀번호가 일치하지 않습니다");
        }
        errors.into_result()?;

        Ok(Self {
            email: form.email.trim().to_string(),
            name: form.name,
            password: form.password,
            role: form.role,
            status: form.status,
        })
    }
}

impl TryFrom<EditMemberForm> for UpdateMember {
    type Error = FormError;

    fn try_from(form: EditMemberForm) -> Result<Self, Self::Error> {
        FieldErrors::of(&form).into_result()?;

        Ok(Self {
            name: (!form.name.is_empty()).then_some(form.name),
            role: form.role,
            status: form.status,
            password: (!form.password.is_empty()).then_some(form.password),
        })
    }
}

/// Loose `something@host.tld` shape check; the collaborator does the real one.
pub(crate) fn looks_like_email(value: &str) -> bool {
    value.match_indices('@').any(|(at, _)| {
        let has_local = value[..at]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_whitespace());
        let domain = value[at + 1..]
            .split(char::is_whitespace)
            .next()
            .unwrap_or_default();
        has_local
            && domain
                .char_indices()
                .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
    })
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_blank(email) {
        return Err(invalid("required", "이메일을 입력해주세요"));
    }
    if !looks_like_email(email) {
        return Err(invalid("email", "유효한 이메일 주소를 입력해주세요"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(invalid("required", "이름을 입력해주세요"));
    }
    Ok(())
}

fn validate_optional_name(name: &str) -> Result<(), ValidationError> {
    if !name.is_empty() && is_blank(name) {
        return Err(invalid("required", "이름은 비어있을 수 없습니다"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(invalid("required", "비밀번호를 입력해주세요"));
    }
    password_length(password)
}

fn validate_optional_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Ok(());
    }
    password_length(password)
}

pub(crate) fn password_length(password: &str) -> Result<(), ValidationError> {
    if char_len(password) < MIN_PASSWORD {
        return Err(invalid("length", "비밀번호는 최소 6자 이상이어야 합니다"));
    }
    Ok(())
}
