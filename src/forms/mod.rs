//! Form definitions backing the add, edit and account pages.
//!
//! Every form validates locally before anything is sent. A field reports
//! only its first failing rule, so each validator below checks its rules in
//! order and stops at the first failure.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

pub mod account;
pub mod campus;
pub mod member;
pub mod question;
pub mod suggested_question;

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Fields(FieldErrors),

    #[error("invalid campus id")]
    InvalidCampusId,
}

/// One message per invalid field, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Records `message` unless the field already failed.
    pub fn insert(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Runs the derived validation of `form`.
    pub(crate) fn of(form: &impl Validate) -> Self {
        match form.validate() {
            Ok(()) => Self::default(),
            Err(errors) => Self::from(&errors),
        }
    }

    pub(crate) fn into_result(self) -> Result<(), FormError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FormError::Fields(self))
        }
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = Self::default();
        for (field, errors) in errors.field_errors() {
            if let Some(error) = errors.first() {
                let message = error
                    .message
                    .as_deref()
                    .unwrap_or_else(|| error.code.as_ref());
                fields.insert(&field, message);
            }
        }
        fields
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Length in characters, not bytes.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Splits a comma-separated tag list, dropping empty entries.
pub(crate) fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
