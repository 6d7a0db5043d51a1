use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::suggested_question::{SuggestedQuestion, SuggestedQuestionPayload};
use crate::forms::{FieldErrors, FormError, char_len, invalid, is_blank};

/// Form shared by the add and edit pages of suggested questions.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct SuggestedQuestionForm {
    #[validate(custom(function = "validate_question"))]
    pub question: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Default for SuggestedQuestionForm {
    fn default() -> Self {
        Self {
            question: String::new(),
            is_active: true,
        }
    }
}

fn default_active() -> bool {
    true
}

impl From<&SuggestedQuestion> for SuggestedQuestionForm {
    fn from(question: &SuggestedQuestion) -> Self {
        Self {
            question: question.question.clone(),
            is_active: question.is_active,
        }
    }
}

impl TryFrom<SuggestedQuestionForm> for SuggestedQuestionPayload {
    type Error = FormError;

    fn try_from(form: SuggestedQuestionForm) -> Result<Self, Self::Error> {
        FieldErrors::of(&form).into_result()?;

        Ok(Self {
            question: form.question.trim().to_string(),
            is_active: form.is_active,
        })
    }
}

fn validate_question(question: &str) -> Result<(), ValidationError> {
    if is_blank(question) {
        return Err(invalid("required", "Question is required"));
    }
    let len = char_len(question.trim());
    if len < 5 {
        return Err(invalid(
            "length",
            "Question must be at least 5 characters long",
        ));
    }
    if len > 500 {
        return Err(invalid("length", "Question must not exceed 500 characters"));
    }
    Ok(())
}
