use std::sync::Arc;

use anyhow::{Result, anyhow};
use filedeck_infrastructure::{
    ConfigOverrides, ConfigService, FileDeckPaths, FileLocalStorage, HttpFileRepository,
};
use tracing_appender::non_blocking::WorkerGuard;

use crate::GlobalArgs;
use crate::app::AppContext;
use crate::logging;

pub struct AppBootstrap {
    pub context: AppContext,
    pub log_guard: WorkerGuard,
}

impl AppBootstrap {
    /// Resolves paths and configuration, installs logging and builds the
    /// stores over the file storage and the HTTP repository.
    pub fn initialize(args: &GlobalArgs) -> Result<Self> {
        let paths = FileDeckPaths::new(args.config_dir.clone())
            .map_err(|e| anyhow!("Failed to resolve filedeck directories: {}", e))?;

        let overrides = ConfigOverrides {
            json_server_url: args.server_url.clone(),
            locale: args.locale,
        };
        let config = ConfigService::new(&paths)
            .load(&overrides)
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

        let log_guard = logging::init(&paths.logs_dir(), &config.logging.level)?;
        tracing::debug!("[Bootstrap] Config directory: {:?}", paths.config_dir());

        let storage = Arc::new(FileLocalStorage::new(paths.local_storage_file()));
        let repository = Arc::new(
            HttpFileRepository::from_config(&config)
                .map_err(|e| anyhow!("Failed to create file repository: {}", e))?,
        );
        tracing::debug!("[Bootstrap] Files endpoint: {}", repository.endpoint());

        let context = AppContext::new(paths, config, storage, repository)
            .map_err(|e| anyhow!("Failed to restore session: {}", e))?;

        Ok(Self { context, log_guard })
    }
}
