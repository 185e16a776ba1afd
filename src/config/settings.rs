// src/config/settings.rs
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// `<config dir>/sherlocklogs/settings.ron`
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sherlocklogs").join("settings.ron"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(Self::settings_path().as_deref())
    }

    /// Defaults, then the optional RON file, then `SHERLOCK_*` env vars.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?;

        if let Some(path) = path {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Ron)
                    .required(false)
            );
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix("SHERLOCK"))
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        Ok(settings.normalized())
    }

    fn normalized(mut self) -> Self {
        self.api_url = self.api_url.trim().trim_end_matches('/').to_string();
        if self.api_url.is_empty() {
            self.api_url = DEFAULT_API_URL.to_string();
        }
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self
    }
}
