//! Configuration model.
//!
//! Loading (files, environment) lives in the infrastructure crate; this
//! module only defines the shape and the defaults.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Base URL of the REST collection when nothing else is configured.
pub const DEFAULT_JSON_SERVER_URL: &str = "http://localhost:3000";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Language of user-facing messages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

/// `[server]` table of config.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Base URL of the remote collection (without the `/files` suffix)
    pub json_server_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            json_server_url: DEFAULT_JSON_SERVER_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// `[ui]` table of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub locale: Locale,
}

/// `[logging]` table of config.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. `info` or `filedeck_core=debug`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.server.json_server_url.trim_end_matches('/')
    }

    /// Endpoint of the file collection.
    pub fn files_endpoint(&self) -> String {
        format!("{}/files", self.base_url())
    }
}
