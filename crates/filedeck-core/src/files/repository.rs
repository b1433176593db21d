//! Remote file collection trait.

use async_trait::async_trait;

use super::model::{FileRecord, NewFileRecord};
use crate::error::Result;

/// The remote collection of file records.
///
/// Implementations report transport failures as
/// [`FileDeckError::Network`](crate::error::FileDeckError::Network),
/// non-success responses as `HttpStatus` and undecodable bodies as `Decode`.
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Returns the full collection in server order.
    async fn list(&self) -> Result<Vec<FileRecord>>;

    /// Creates a record and returns it with its server-assigned id.
    async fn create(&self, record: &NewFileRecord) -> Result<FileRecord>;

    /// Deletes the record with the given id.
    async fn delete(&self, id: &str) -> Result<()>;
}
