//! File (resource) domain module.
//!
//! # Module Structure
//!
//! - `model`: `FileRecord` and the upload payload `NewFileRecord`
//! - `repository`: the remote collection abstraction
//! - `status`: store status and the typed store error
//! - `store`: the file store wrapping the repository

mod model;
mod repository;
mod status;
mod store;

pub use model::{FileRecord, NewFileRecord};
pub use repository::FileRepository;
pub use status::{FileOperation, FileStoreStatus, StoreError, unknown_error_message};
pub use store::{FileStore, FileStoreSnapshot};
