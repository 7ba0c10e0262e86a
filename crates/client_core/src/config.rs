use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const ENV_PREFIX: &str = "HR_CONSOLE";
const APP_DIR: &str = "hr_console";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] ConfigError),
    #[error(transparent)]
    Invalid(#[from] ClientError),
}

/// Client-side settings shared by the console and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub confirm_deletes: bool,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            confirm_deletes: true,
            log_filter: "info".to_string(),
        }
    }
}

impl ClientSettings {
    /// `<config dir>/hr_console/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads defaults, then the TOML file, then `HR_CONSOLE__*` variables.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load_from(Some((path, true)), None),
            None => {
                let default_path = Self::default_path();
                Self::load_from(default_path.as_deref().map(|p| (p, false)), None)
            }
        }
    }

    /// `env` replaces the process environment when given.
    pub fn load_from(
        file: Option<(&Path, bool)>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, SettingsError> {
        let defaults = ClientSettings::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("confirm_deletes", defaults.confirm_deletes)?
            .set_default("log_filter", defaults.log_filter)?;

        if let Some((path, required)) = file {
            builder = builder.add_source(File::from(path).required(required));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let settings: ClientSettings = builder.build()?.try_deserialize()?;
        settings.base_url()?;
        Ok(settings)
    }

    pub fn base_url(&self) -> Result<Url, ClientError> {
        parse_base_url(&self.base_url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Parses an http(s) base URL and guarantees a trailing slash on its path.
pub fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
