//! File-backed durable key/value storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use filedeck_core::error::Result;
use filedeck_core::session::KeyValueStorage;

use super::atomic_toml::AtomicTomlFile;

type Items = BTreeMap<String, String>;

/// Durable string key/value storage kept in a single TOML table.
///
/// Every call goes to disk, so separate instances (or processes) pointed at
/// the same file observe each other's writes.
///
/// ```toml
/// user = '{"id":"user123","name":"alice"}'
/// ```
pub struct FileLocalStorage {
    file: AtomicTomlFile<Items>,
}

impl FileLocalStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .file
            .load()?
            .map(|items| items.into_keys().collect())
            .unwrap_or_default())
    }
}

impl KeyValueStorage for FileLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.file.load()?.and_then(|mut items| items.remove(key)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(Items::new(), |items| {
            items.insert(key.to_string(), value.to_string());
            Ok(())
        })?;
        tracing::debug!("[LocalStorage] Stored '{}' in {:?}", key, self.path());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        // Nothing to rewrite when the file does not exist yet
        if !self.path().exists() {
            return Ok(());
        }
        self.file.update(Items::new(), |items| {
            items.remove(key);
            Ok(())
        })
    }
}
