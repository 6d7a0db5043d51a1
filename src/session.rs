//! Signed-in administrator session.
//!
//! Created once, from a login response or a persisted session file, and
//! handed explicitly to the API client.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::account::{AdminProfile, LoginResponse};
use crate::domain::types::MemberRole;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid session file: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("session token is empty")]
    EmptyToken,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    token: String,
    user: AdminProfile,
}

impl SessionContext {
    pub fn new(token: impl Into<String>, user: AdminProfile) -> Result<Self, SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        Ok(Self { token, user })
    }

    pub fn from_login(response: LoginResponse) -> Result<Self, SessionError> {
        Self::new(response.token, response.user)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &AdminProfile {
        &self.user
    }

    /// Only master admins may manage members.
    pub fn is_master_admin(&self) -> bool {
        self.user.role == MemberRole::MasterAdmin
    }

    /// Replaces the cached profile after an account update.
    pub fn set_user(&mut self, user: AdminProfile) {
        self.user = user;
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let raw = fs::read_to_string(path)?;
        let session: Self = serde_json::from_str(&raw)?;
        Self::new(session.token, session.user)
    }

    /// Like [`SessionContext::load`], but a missing file is not an error.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, SessionError> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Removes the persisted session, used on sign-out.
    pub fn clear(path: &Path) -> Result<(), SessionError> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
