//! Question add and edit forms.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::question::{NewQuestion, Question, UpdateQuestion};
use crate::domain::types::{CampusId, EntityStatus, ImageId};
use crate::forms::{FieldErrors, FormError, char_len, invalid, is_blank, split_tags};

/// Images a question may carry.
pub const MAX_IMAGES: usize = 5;

const TOO_MANY_IMAGES: &str = "최대 5개의 이미지만 허용됩니다.";

#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct AddQuestionForm {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[validate(custom(function = "validate_content"))]
    pub content: String,
    #[validate(custom(function = "validate_campus"))]
    pub campus_id: String,
    #[serde(default)]
    pub status: EntityStatus,
    /// Comma-separated tag list.
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: String,
    #[serde(default)]
    #[validate(length(max = 5, message = "최대 5개의 이미지만 허용됩니다."))]
    pub image_ids: Vec<ImageId>,
}

/// Edit form; empty fields are left unchanged on the collaborator.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct EditQuestionForm {
    #[serde(default)]
    #[validate(custom(function = "validate_optional_title"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_content"))]
    pub content: String,
    #[serde(default)]
    pub campus_id: String,
    #[serde(default)]
    pub status: EntityStatus,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: String,
    #[serde(default)]
    #[validate(length(max = 5, message = "최대 5개의 이미지만 허용됩니다."))]
    pub image_ids: Vec<ImageId>,
}

impl From<&Question> for EditQuestionForm {
    fn from(question: &Question) -> Self {
        Self {
            title: question.title.clone(),
            content: question.content.clone().unwrap_or_default(),
            campus_id: question.campus.id.to_string(),
            status: question.status,
            tags: question.tags.join(", "),
            image_ids: question.image_ids.clone(),
        }
    }
}

impl TryFrom<AddQuestionForm> for NewQuestion {
    type Error = FormError;

    fn try_from(form: AddQuestionForm) -> Result<Self, Self::Error> {
        FieldErrors::of(&form).into_result()?;

        let campus_id = CampusId::new(form.campus_id).map_err(|_| FormError::InvalidCampusId)?;

        Ok(Self {
            title: form.title,
            content: form.content,
            status: form.status,
            campus_id,
            tags: split_tags(&form.tags),
            image_ids: form.image_ids,
        })
    }
}

impl TryFrom<EditQuestionForm> for UpdateQuestion {
    type Error = FormError;

    fn try_from(form: EditQuestionForm) -> Result<Self, Self::Error> {
        FieldErrors::of(&form).into_result()?;

        let campus_id = if form.campus_id.is_empty() {
            None
        } else {
            Some(CampusId::new(form.campus_id).map_err(|_| FormError::InvalidCampusId)?)
        };

        Ok(Self {
            title: non_empty(form.title),
            content: non_empty(form.content),
            status: Some(form.status),
            campus_id,
            tags: (!form.tags.is_empty()).then(|| split_tags(&form.tags)),
            image_ids: form.image_ids,
        })
    }
}

/// Ids of images uploaded for a question form, in upload order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageSet {
    ids: Vec<ImageId>,
}

impl ImageSet {
    pub fn new(ids: Vec<ImageId>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[ImageId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// How many more images may be added.
    pub fn remaining(&self) -> usize {
        MAX_IMAGES.saturating_sub(self.ids.len())
    }

    /// Checks that `count` more images fit before anything is uploaded.
    pub fn ensure_room(&self, count: usize) -> Result<(), String> {
        if count > self.remaining() {
            return Err(format!(
                "{TOO_MANY_IMAGES} 이미 {}개의 이미지가 있습니다.",
                self.ids.len()
            ));
        }
        Ok(())
    }

    pub fn extend(&mut self, ids: impl IntoIterator<Item = ImageId>) {
        self.ids.extend(ids);
    }

    /// Removes the image at `index`; out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<ImageId> {
        (index < self.ids.len()).then(|| self.ids.remove(index))
    }

    pub fn into_ids(self) -> Vec<ImageId> {
        self.ids
    }
}

/// Whether `file_name` has one of the accepted image extensions.
pub fn is_accepted_image(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif"))
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if is_blank(title) {
        return Err(invalid("required", "제목을 입력해주세요"));
    }
    title_length(title)
}

fn validate_optional_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Ok(());
    }
    validate_title(title)
}

fn title_length(title: &str) -> Result<(), ValidationError> {
    if !(5..=200).contains(&char_len(title)) {
        return Err(invalid("length", "제목은 5자 이상 200자 이하여야 합니다"));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    if is_blank(content) {
        return Err(invalid("required", "내용을 입력해주세요"));
    }
    if char_len(content) < 10 {
        return Err(invalid("length", "내용은 최소 10자 이상이어야 합니다"));
    }
    Ok(())
}

fn validate_optional_content(content: &str) -> Result<(), ValidationError> {
    if content.is_empty() {
        return Ok(());
    }
    validate_content(content)
}

fn validate_campus(campus_id: &str) -> Result<(), ValidationError> {
    if is_blank(campus_id) {
        return Err(invalid("required", "캠퍼스를 선택해주세요"));
    }
    Ok(())
}

fn validate_tags(tags: &str) -> Result<(), ValidationError> {
    if split_tags(tags).iter().any(|tag| char_len(tag) > 50) {
        return Err(invalid("length", "각 태그는 50자를 초과할 수 없습니다"));
    }
    Ok(())
}
