use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CampusId, EntityStatus};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campus {
    #[serde(rename = "_id")]
    pub id: CampusId,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: EntityStatus,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload sent when creating a campus.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCampus {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub status: EntityStatus,
    pub is_default: bool,
}

/// Partial update of a campus; absent fields are left untouched server-side.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl UpdateCampus {
    /// Update touching only the publication status.
    #[must_use]
    pub fn status(status: EntityStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
