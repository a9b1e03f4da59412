// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Application settings: JSON file first, environment variables on top.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::i18n::Locale;
use crate::utils::date::{DEFAULT_TIMEZONE, resolve_timezone};

/// Path of the settings file; overrides [`DEFAULT_CONFIG_FILE`].
pub const CONFIG_ENV: &str = "FORMSTARTER_CONFIG";
pub const LOCALE_ENV: &str = "FORMSTARTER_LOCALE";
pub const TIMEZONE_ENV: &str = "FORMSTARTER_TIMEZONE";
pub const SUBMIT_DELAY_ENV: &str = "FORMSTARTER_SUBMIT_DELAY_MS";
pub const START_PATH_ENV: &str = "FORMSTARTER_START_PATH";

pub const DEFAULT_CONFIG_FILE: &str = "formstarter.json";
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;

/// Output style of log lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// UI language.
    pub locale: Locale,
    /// Timezone for displayed dates (preset key or IANA name).
    pub timezone: String,
    /// Latency of the simulated post API.
    pub submit_delay_ms: u64,
    pub log_format: LogFormat,
    /// Route path shown at startup, resolved like a URL path.
    pub start_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            log_format: LogFormat::default(),
            start_path: "/".to_string(),
        }
    }
}

impl AppConfig {
    /// Settings file location, honouring [`CONFIG_ENV`].
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from [`AppConfig::path`] and apply process environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::path())?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a settings file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `FORMSTARTER_*` overrides read through `var`.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(locale) = var(LOCALE_ENV) {
            self.locale = Locale::from_code(&locale);
        }
        if let Some(tz) = var(TIMEZONE_ENV) {
            self.timezone = tz.trim().to_string();
        }
        if let Some(delay) = var(SUBMIT_DELAY_ENV) {
            self.submit_delay_ms = delay.trim().parse().with_context(|| {
                format!("{SUBMIT_DELAY_ENV} must be a whole number of milliseconds")
            })?;
        }
        if let Some(path) = var(START_PATH_ENV) {
            self.start_path = path.trim().to_string();
        }
        self.validate()
    }

    /// Reject settings that would fail later at runtime.
    pub fn validate(&self) -> Result<()> {
        resolve_timezone(&self.timezone).context("invalid timezone in config")?;
        Ok(())
    }

    /// Write to [`AppConfig::path`].
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }
}
