//! Configuration handling for the form

use crate::submission::{SubmitSettings, DEFAULT_DISPATCH_TIMEOUT};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "COMMUTING_API_URL";

/// Environment variable overriding the per-dispatch timeout (seconds)
pub const TIMEOUT_ENV: &str = "COMMUTING_DISPATCH_TIMEOUT_SECS";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the survey API; `/sf/commuting` is appended
    pub api_url: Option<String>,
    /// Per-record dispatch timeout in seconds
    pub dispatch_timeout_secs: Option<u64>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("es", "commuting", "commute-form")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file location, next to the application data
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("commute-form.log"))
    }

    /// Load configuration from the config file, then apply environment overrides.
    /// A first run writes an empty template for the user to fill in.
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            Some(path) => {
                let config = Self::default();
                if let Err(err) = config.save_to(&path) {
                    tracing::warn!(path = %path.display(), error = %err, "could not write config template");
                }
                config
            }
            None => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides looked up by variable name
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_url = Some(url);
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.dispatch_timeout_secs = Some(secs),
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid {TIMEOUT_ENV}"),
            }
        }
        self
    }

    /// Settings for the submission pipeline.
    ///
    /// The base URL is passed through unvalidated; a missing or malformed
    /// value surfaces as a configuration error when a submission starts.
    pub fn submit_settings(&self) -> SubmitSettings {
        let dispatch_timeout = self
            .dispatch_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_DISPATCH_TIMEOUT);
        SubmitSettings {
            base_url: self.api_url.clone(),
            dispatch_timeout,
        }
    }
}
