//! Strongly-typed value objects shared by the console entities.
//!
//! Identifiers issued by the collaborator API are opaque strings. The wrappers
//! below reject empty values so that a path segment such as
//! `/campuses/{id}` can never collapse into `/campuses/`.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided status literal is not one of `ACTIVE`/`INACTIVE`.
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    /// Provided role literal is not a known member role.
    #[error("invalid role: {0}")]
    InvalidRole(String),
    /// Provided rows-per-page value is not offered by the console.
    #[error("invalid page size: {0}")]
    InvalidPageLimit(u32),
}

/// Macro to generate lightweight newtypes for opaque, non-empty identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier ensuring it is not blank.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(CampusId, "Unique identifier for a campus.");
id_newtype!(QuestionId, "Unique identifier for a question.");
id_newtype!(MemberId, "Unique identifier for a member account.");
id_newtype!(
    SuggestedQuestionId,
    "Unique identifier for a suggested starter question."
);
id_newtype!(AuthorId, "Unique identifier for a question author.");
id_newtype!(ImageId, "Identifier returned by the upload endpoint.");

/// Publication status shared by campuses, questions and members.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    #[default]
    Active,
    Inactive,
}

impl EntityStatus {
    /// Wire literal understood by the collaborator API.
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityStatus::Active => "ACTIVE",
            EntityStatus::Inactive => "INACTIVE",
        }
    }

    /// Localized label shown in status toggles.
    pub const fn label(self) -> &'static str {
        match self {
            EntityStatus::Active => "활성",
            EntityStatus::Inactive => "비활성",
        }
    }
}

impl Display for EntityStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(EntityStatus::Active),
            "INACTIVE" => Ok(EntityStatus::Inactive),
            other => Err(TypeConstraintError::InvalidStatus(other.to_string())),
        }
    }
}

/// Role assigned to a console member.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    MasterAdmin,
    SubAdmin,
    #[default]
    NormalUser,
}

impl MemberRole {
    pub const ALL: [MemberRole; 3] = [
        MemberRole::MasterAdmin,
        MemberRole::SubAdmin,
        MemberRole::NormalUser,
    ];

    /// Wire literal understood by the collaborator API.
    pub const fn as_str(self) -> &'static str {
        match self {
            MemberRole::MasterAdmin => "MASTER_ADMIN",
            MemberRole::SubAdmin => "SUB_ADMIN",
            MemberRole::NormalUser => "NORMAL_USER",
        }
    }

    /// Human readable label used by the role filter.
    pub const fn label(self) -> &'static str {
        match self {
            MemberRole::MasterAdmin => "Master Admin",
            MemberRole::SubAdmin => "Sub Admin",
            MemberRole::NormalUser => "Normal User",
        }
    }

    /// Resolves a filter label (`"Sub Admin"`) back to the role.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.label() == label)
    }
}

impl Display for MemberRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidRole(s.to_string()))
    }
}
