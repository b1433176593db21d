//! Unified path management for filedeck files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/filedeck/          # Config directory
//! ├── config.toml              # Application configuration
//! ├── local_storage.toml       # Durable key/value storage (session)
//! └── logs/                    # Application logs
//!     └── filedeck.log.YYYY-MM-DD
//!
//! ~/.local/share/filedeck/     # Data directory
//! └── db.json                  # Mock backend collection
//! ```
//!
//! Passing a base directory to [`FileDeckPaths::new`] roots both trees
//! under it instead (`<base>/` for config, `<base>/data/` for data).

use std::path::{Path, PathBuf};

use filedeck_core::error::{FileDeckError, Result};

const APP_DIR_NAME: &str = "filedeck";

/// Resolved filedeck directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDeckPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl FileDeckPaths {
    /// Resolves the platform directories, or roots everything under
    /// `base_dir` when given.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        match base_dir {
            Some(base) => Ok(Self {
                data_dir: base.join("data"),
                config_dir: base,
            }),
            None => {
                let config_dir = dirs::config_dir()
                    .ok_or_else(|| FileDeckError::config("Cannot find config directory"))?
                    .join(APP_DIR_NAME);
                let data_dir = dirs::data_dir()
                    .ok_or_else(|| FileDeckError::config("Cannot find data directory"))?
                    .join(APP_DIR_NAME);
                Ok(Self {
                    config_dir,
                    data_dir,
                })
            }
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// File backing the durable key/value storage.
    pub fn local_storage_file(&self) -> PathBuf {
        self.config_dir.join("local_storage.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    /// Default collection document of the mock backend.
    pub fn mock_db_file(&self) -> PathBuf {
        self.data_dir.join("db.json")
    }
}
