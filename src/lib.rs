//! Admin console core for the campus Q&A knowledge base.
//!
//! List pages (campuses, members, questions, suggested questions) are built on
//! [`listing::ListController`], which keeps filters, pagination and rows in
//! sync with the collaborator API.

#[cfg(feature = "data")]
pub mod api;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod listing;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod render;
#[cfg(feature = "data")]
pub mod services;
#[cfg(feature = "data")]
pub mod session;

#[cfg(feature = "client")]
pub use bootstrap::{Console, StartupError, connect};

#[cfg(feature = "client")]
mod bootstrap {
    use thiserror::Error;

    use crate::api::ApiError;
    use crate::api::http::HttpApi;
    use crate::models::config::ConsoleConfig;
    use crate::session::{SessionContext, SessionError};

    #[derive(Debug, Error)]
    pub enum StartupError {
        #[error(transparent)]
        Api(#[from] ApiError),

        #[error(transparent)]
        Session(#[from] SessionError),
    }

    /// API client plus the session restored from disk, if any.
    #[derive(Debug)]
    pub struct Console {
        pub api: HttpApi,
        pub session: Option<SessionContext>,
    }

    /// Builds the API client for `config` and restores the persisted session.
    pub fn connect(config: &ConsoleConfig) -> Result<Console, StartupError> {
        let mut api = HttpApi::new(&config.api_base_url)?;

        let session = match &config.session_file {
            Some(path) => SessionContext::load_optional(path)?,
            None => None,
        };
        api.set_session(session.as_ref());

        match &session {
            Some(session) => log::info!(
                "Restored session of {} against {}",
                session.user().email,
                api.base_url()
            ),
            None => log::info!("No stored session; sign in against {}", api.base_url()),
        }

        Ok(Console { api, session })
    }
}
