//! Configuration model loaded from external sources.

use std::env;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

/// Prefix of environment variables overriding file settings (`RAGLET_API_BASE_URL`).
pub const ENV_PREFIX: &str = "RAGLET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("api_base_url must be an absolute http(s) url, got {0:?}")]
    InvalidBaseUrl(String),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// Settings of the console client.
pub struct ConsoleConfig {
    /// Origin of the collaborator API; `/api/admin` is appended per request.
    pub api_base_url: String,
    /// Where the signed-in session is persisted between runs.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl ConsoleConfig {
    /// Loads `config/default.yaml`, the `config/{RAGLET_ENV}` profile and the environment.
    ///
    /// Both files are optional; `.env` is expected to be loaded by the caller.
    pub fn load() -> Result<Self, ConfigError> {
        let profile = env::var("RAGLET_ENV").unwrap_or_else(|_| "local".into());

        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Self::from_settings(settings)
    }

    /// Loads a single settings file overlaid with the environment.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, ConfigError> {
        let config = settings.try_deserialize::<Self>()?;
        config.base_url()?;
        Ok(config)
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_base_url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| ConfigError::InvalidBaseUrl(self.api_base_url.clone()))
    }
}
