use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{EntityStatus, MemberId, MemberRole};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: MemberId,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: MemberRole,
    pub status: EntityStatus,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewMember {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: MemberRole,
    pub status: EntityStatus,
}

/// Partial member update; only provided fields are sent.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct UpdateMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateMember {
    #[must_use]
    pub fn status(status: EntityStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
