//! Campus add and edit forms.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::campus::{Campus, NewCampus, UpdateCampus};
use crate::domain::types::EntityStatus;
use crate::forms::{FieldErrors, FormError, char_len, invalid, is_blank};

/// Fields of the campus add and edit pages.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct CampusForm {
    /// Technical name; also names the vector collection on the collaborator.
    #[validate(custom(function = "validate_campus_name"))]
    pub name: String,
    #[validate(custom(function = "validate_display_name"))]
    pub display_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_description"))]
    pub description: String,
    #[serde(default)]
    pub status: EntityStatus,
    #[serde(default)]
    pub is_default: bool,
}

/// Validated campus fields.
#[derive(Clone, Debug, PartialEq)]
pub struct CampusPayload {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub status: EntityStatus,
    pub is_default: bool,
}

impl From<&Campus> for CampusForm {
    /// Prefills the edit page.
    fn from(campus: &Campus) -> Self {
        Self {
            name: campus.name.clone(),
            display_name: campus.display_name.clone(),
            description: campus.description.clone().unwrap_or_default(),
            status: campus.status,
            is_default: campus.is_default,
        }
    }
}

impl TryFrom<CampusForm> for CampusPayload {
    type Error = FormError;

    fn try_from(form: CampusForm) -> Result<Self, Self::Error> {
        FieldErrors::of(&form).into_result()?;

        Ok(Self {
            name: form.name,
            display_name: form.display_name,
            description: form.description,
            status: form.status,
            is_default: form.is_default,
        })
    }
}

impl CampusPayload {
    pub fn into_new(self) -> NewCampus {
        NewCampus {
            name: self.name,
            display_name: self.display_name,
            description: self.description,
            status: self.status,
            is_default: self.is_default,
        }
    }

    pub fn into_update(self) -> UpdateCampus {
        UpdateCampus {
            name: Some(self.name),
            display_name: Some(self.display_name),
            description: Some(self.description),
            status: Some(self.status),
            is_default: Some(self.is_default),
        }
    }
}

fn validate_campus_name(name: &str) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(invalid("required", "캠퍼스명을 입력해주세요"));
    }
    if !(2..=50).contains(&char_len(name)) {
        return Err(invalid(
            "length",
            "캠퍼스명은 2자 이상 50자 이하여야 합니다",
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid(
            "charset",
            "캠퍼스명은 영문자, 숫자, 하이픈, 언더스코어만 사용할 수 있습니다",
        ));
    }
    Ok(())
}

fn validate_display_name(display_name: &str) -> Result<(), ValidationError> {
    if is_blank(display_name) {
        return Err(invalid("required", "표시명을 입력해주세요"));
    }
    if !(2..=100).contains(&char_len(display_name)) {
        return Err(invalid(
            "length",
            "표시명은 2자 이상 100자 이하여야 합니다",
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if char_len(description) > 500 {
        return Err(invalid("length", "설명은 500자를 초과할 수 없습니다"));
    }
    Ok(())
}
