pub mod config_service;
pub mod file_payload;
pub mod http_file_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::{ConfigOverrides, ConfigService};
pub use crate::file_payload::payload_from_path;
pub use crate::http_file_repository::HttpFileRepository;
pub use crate::paths::FileDeckPaths;
pub use crate::storage::{AtomicTomlFile, FileLocalStorage};
