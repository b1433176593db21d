use std::sync::Arc;

use filedeck_core::config::AppConfig;
use filedeck_core::files::{FileRepository, FileStore};
use filedeck_core::router::{Location, Router};
use filedeck_core::session::{KeyValueStorage, SessionStore};
use filedeck_core::Result;
use filedeck_infrastructure::FileDeckPaths;

/// Everything a command needs, created once per run by the bootstrap.
pub struct AppContext {
    pub paths: FileDeckPaths,
    pub config: AppConfig,
    pub session: SessionStore,
    pub files: FileStore,
    pub router: Router,
}

impl AppContext {
    /// Wires the stores over the given storage and repository.
    pub fn new(
        paths: FileDeckPaths,
        config: AppConfig,
        storage: Arc<dyn KeyValueStorage>,
        repository: Arc<dyn FileRepository>,
    ) -> Result<Self> {
        Ok(Self {
            paths,
            config,
            session: SessionStore::load(storage)?,
            files: FileStore::new(repository),
            router: Router::default(),
        })
    }

    /// Navigates to `path` under the current session.
    pub fn navigate(&mut self, path: &str) -> Result<Location> {
        self.router.push(path, &self.session).cloned()
    }
}
