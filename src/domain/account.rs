use serde::{Deserialize, Serialize};

use crate::domain::types::MemberRole;

/// Profile of the signed-in administrator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdminProfile {
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: MemberRole,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body returned by the admin login endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminProfile,
}

/// Either a profile rename or a password change; both hit the same endpoint.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ProfileUpdate {
    Name {
        name: String,
    },
    Password {
        #[serde(rename = "currentPassword")]
        current_password: String,
        #[serde(rename = "newPassword")]
        new_password: String,
    },
}
