//! File store.
//!
//! Client-side view of the remote file collection: the ordered record
//! sequence plus loading and error status. Operations never fail towards
//! the caller; failures are recorded as the store's current error.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use super::model::{FileRecord, NewFileRecord};
use super::repository::FileRepository;
use super::status::{FileOperation, FileStoreStatus, StoreError};
use crate::config::Locale;
use crate::error::Result;

/// Point-in-time copy of the store state, published after every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileStoreSnapshot {
    pub files: Vec<FileRecord>,
    pub loading: bool,
    pub error: Option<StoreError>,
}

#[derive(Debug, Default)]
struct FileStoreState {
    files: Vec<FileRecord>,
    /// Operations started and not yet finished
    in_flight: usize,
    error: Option<StoreError>,
}

impl FileStoreState {
    fn snapshot(&self) -> FileStoreSnapshot {
        FileStoreSnapshot {
            files: self.files.clone(),
            loading: self.in_flight > 0,
            error: self.error.clone(),
        }
    }
}

/// Holds the file collection fetched from a [`FileRepository`].
///
/// Operations take `&self` and may overlap; the state lock is never held
/// across an `.await`, so results are applied in completion order.
pub struct FileStore {
    repository: Arc<dyn FileRepository>,
    state: Mutex<FileStoreState>,
    updates: watch::Sender<FileStoreSnapshot>,
}

/// Marks one operation in flight; releases it on drop, including when the
/// operation future is cancelled.
struct InFlight<'a> {
    store: &'a FileStore,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.store.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        let snapshot = state.snapshot();
        drop(state);
        self.store.updates.send_replace(snapshot);
    }
}

impl FileStore {
    pub fn new(repository: Arc<dyn FileRepository>) -> Self {
        let (updates, _) = watch::channel(FileStoreSnapshot::default());
        Self {
            repository,
            state: Mutex::new(FileStoreState::default()),
            updates,
        }
    }

    // ============================================================================
    // Operations
    // ============================================================================

    /// Replaces the local sequence with the remote collection.
    ///
    /// On failure the previous sequence is kept.
    pub async fn fetch_all(&self) {
        let _guard = self.begin();
        let result = self.repository.list().await;
        self.apply(FileOperation::Fetch, result, |state, files| {
            tracing::debug!("[FileStore] Fetched {} file(s)", files.len());
            state.files = files;
        });
    }

    /// Uploads `record` and appends the server's copy (with its id).
    pub async fn upload(&self, record: NewFileRecord) {
        let _guard = self.begin();
        let result = self.repository.create(&record).await;
        self.apply(FileOperation::Upload, result, |state, created| {
            tracing::debug!("[FileStore] Uploaded '{}' as {}", created.name, created.id);
            state.files.push(created);
        });
    }

    /// Deletes `id` remotely, then drops the first local record with that id.
    ///
    /// An id unknown locally leaves the sequence unchanged.
    pub async fn remove(&self, id: &str) {
        let _guard = self.begin();
        let result = self.repository.delete(id).await;
        self.apply(FileOperation::Delete, result, |state, ()| {
            if let Some(position) = state.files.iter().position(|file| file.id == id) {
                state.files.remove(position);
            }
        });
    }

    // ============================================================================
    // Derived reads
    // ============================================================================

    pub fn files(&self) -> Vec<FileRecord> {
        self.lock().files.clone()
    }

    pub fn find(&self, id: &str) -> Option<FileRecord> {
        self.lock().files.iter().find(|file| file.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.lock().in_flight > 0
    }

    pub fn error(&self) -> Option<StoreError> {
        self.lock().error.clone()
    }

    /// The current error as user-facing text.
    pub fn error_message(&self, locale: Locale) -> Option<&'static str> {
        self.lock()
            .error
            .as_ref()
            .map(|error| error.user_message(locale))
    }

    pub fn status(&self) -> FileStoreStatus {
        let state = self.lock();
        if state.in_flight > 0 {
            FileStoreStatus::Loading
        } else if let Some(ref error) = state.error {
            FileStoreStatus::Error(error.clone())
        } else {
            FileStoreStatus::Idle
        }
    }

    pub fn snapshot(&self) -> FileStoreSnapshot {
        self.lock().snapshot()
    }

    /// Receives a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<FileStoreSnapshot> {
        self.updates.subscribe()
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn lock(&self) -> MutexGuard<'_, FileStoreState> {
        // State stays consistent between statements, so a poisoned lock is usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self) -> InFlight<'_> {
        let mut state = self.lock();
        state.error = None;
        state.in_flight += 1;
        let snapshot = state.snapshot();
        drop(state);
        self.updates.send_replace(snapshot);
        InFlight { store: self }
    }

    fn apply<T>(
        &self,
        operation: FileOperation,
        result: Result<T>,
        on_success: impl FnOnce(&mut FileStoreState, T),
    ) {
        let mut state = self.lock();
        match result {
            Ok(value) => on_success(&mut state, value),
            Err(error) => {
                tracing::warn!("[FileStore] {:?} failed: {}", operation, error);
                state.error = Some(StoreError::new(operation, error));
            }
        }
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("state", &*self.lock())
            .finish_non_exhaustive()
    }
}
