//! Configuration loading.
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. `config.toml` in the config directory
//! 3. environment (`FILEDECK_JSON_SERVER_URL`, then the legacy
//!    `VITE_JSON_SERVER_URL`; `FILEDECK_LOCALE`; `FILEDECK_LOG`)
//! 4. explicit overrides (command-line flags)

use std::str::FromStr;

use filedeck_core::config::{AppConfig, Locale};
use filedeck_core::error::{FileDeckError, Result};
use reqwest::Url;

use crate::paths::FileDeckPaths;
use crate::storage::AtomicTomlFile;

pub const ENV_JSON_SERVER_URL: &str = "FILEDECK_JSON_SERVER_URL";
pub const ENV_LEGACY_JSON_SERVER_URL: &str = "VITE_JSON_SERVER_URL";
pub const ENV_LOCALE: &str = "FILEDECK_LOCALE";
pub const ENV_LOG: &str = "FILEDECK_LOG";

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub json_server_url: Option<String>,
    pub locale: Option<Locale>,
}

/// Loads and validates [`AppConfig`].
pub struct ConfigService {
    file: AtomicTomlFile<AppConfig>,
}

impl ConfigService {
    pub fn new(paths: &FileDeckPaths) -> Self {
        Self {
            file: AtomicTomlFile::new(paths.config_file()),
        }
    }

    /// Loads the configuration using the process environment.
    pub fn load(&self, overrides: &ConfigOverrides) -> Result<AppConfig> {
        self.load_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Loads the configuration with an explicit environment lookup.
    pub fn load_with_env<F>(&self, overrides: &ConfigOverrides, env: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.file.load()?.unwrap_or_default();

        if let Some(url) = env(ENV_JSON_SERVER_URL).or_else(|| env(ENV_LEGACY_JSON_SERVER_URL)) {
            config.server.json_server_url = url;
        }
        if let Some(raw) = env(ENV_LOCALE) {
            config.ui.locale = Locale::from_str(raw.trim())
                .map_err(|_| FileDeckError::config(format!("unsupported locale '{}'", raw)))?;
        }
        if let Some(level) = env(ENV_LOG) {
            config.logging.level = level;
        }

        if let Some(ref url) = overrides.json_server_url {
            config.server.json_server_url = url.clone();
        }
        if let Some(locale) = overrides.locale {
            config.ui.locale = locale;
        }

        validate_server_url(&config.server.json_server_url)?;
        tracing::debug!("[Config] JSON server URL: {}", config.server.json_server_url);
        Ok(config)
    }

    /// Writes `config` to config.toml.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        validate_server_url(&config.server.json_server_url)?;
        self.file.save(config)
    }
}

/// Parses `raw` as an http(s) URL with a host.
pub fn validate_server_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| FileDeckError::config(format!("invalid JSON server URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(FileDeckError::config(format!(
            "JSON server URL must be http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(FileDeckError::config(format!(
            "JSON server URL '{}' has no host",
            raw
        )));
    }
    Ok(url)
}

/// Port the mock backend should listen on for `url` (3000 when absent).
pub fn port_of(url: &Url) -> u16 {
    url.port().unwrap_or(3000)
}
