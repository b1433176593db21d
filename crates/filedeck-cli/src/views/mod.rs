//! Terminal renderings of the routed views.
//!
//! Views only read store state; loading data for a view is the job of the
//! command that navigated there.

mod files;
mod pages;

use std::io::{self, Write};

use filedeck_core::router::{Location, View};

use crate::app::AppContext;

pub use files::render_store_error;

/// Renders the view `location` resolved to.
pub fn render(out: &mut dyn Write, ctx: &AppContext, location: &Location) -> io::Result<()> {
    match location.view {
        View::Home => pages::home(out, ctx),
        View::Login => pages::login(out, location),
        View::FileUploader => pages::uploader(out),
        View::DynamicPage => pages::dynamic_page(out, location),
        View::FileList => files::file_list(out, ctx),
        View::FilePreview => files::file_preview(out, ctx, location),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use filedeck_core::config::AppConfig;
    use filedeck_core::error::{FileDeckError, Result};
    use filedeck_core::files::{FileRecord, FileRepository, NewFileRecord};
    use filedeck_core::session::MemoryStorage;
    use filedeck_infrastructure::FileDeckPaths;

    use crate::app::AppContext;

    /// Repository serving a fixed list; writes fail unless `writable`.
    pub struct FixedRepository {
        pub files: Vec<FileRecord>,
        pub writable: bool,
        pub unreachable: bool,
    }

    #[async_trait]
    impl FileRepository for FixedRepository {
        async fn list(&self) -> Result<Vec<FileRecord>> {
            if self.unreachable {
                return Err(FileDeckError::network("connection refused"));
            }
            Ok(self.files.clone())
        }

        async fn create(&self, record: &NewFileRecord) -> Result<FileRecord> {
            if self.writable {
                Ok(record.clone().into_record("new1"))
            } else {
                Err(FileDeckError::http_status(500, "Internal Server Error"))
            }
        }

        async fn delete(&self, id: &str) -> Result<()> {
            if self.writable && self.files.iter().any(|f| f.id == id) {
                Ok(())
            } else {
                Err(FileDeckError::http_status(404, "Not Found"))
            }
        }
    }

    pub fn context(files: Vec<FileRecord>, writable: bool) -> AppContext {
        context_with(FixedRepository {
            files,
            writable,
            unreachable: false,
        })
    }

    pub fn context_with(repository: FixedRepository) -> AppContext {
        colored::control::set_override(false);
        let paths = FileDeckPaths::new(Some(std::env::temp_dir().join("filedeck-test"))).unwrap();
        AppContext::new(
            paths,
            AppConfig::default(),
            Arc::new(MemoryStorage::new()),
            Arc::new(repository),
        )
        .unwrap()
    }

    pub fn rendered(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }
}
