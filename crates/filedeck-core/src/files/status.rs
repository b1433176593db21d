//! File store status and errors.

use crate::config::Locale;
use crate::error::{ErrorKind, FileDeckError};

/// The store operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileOperation {
    Fetch,
    Upload,
    Delete,
}

impl FileOperation {
    /// User-facing failure text for this operation.
    pub fn failure_message(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Fetch, Locale::En) => "Failed to retrieve files",
            (Self::Fetch, Locale::Fr) => "Erreur lors de la récupération des fichiers",
            (Self::Upload, Locale::En) => "Failed to upload the file",
            (Self::Upload, Locale::Fr) => "Erreur lors de l'upload des fichiers",
            (Self::Delete, Locale::En) => "Failed to delete the file",
            (Self::Delete, Locale::Fr) => "Erreur lors de la suppression du fichier",
        }
    }
}

/// Generic text for failures with no known cause.
pub fn unknown_error_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "An unknown error occurred",
        Locale::Fr => "Une erreur inconnue est survenue",
    }
}

/// A failure absorbed by the file store.
///
/// Keeps the typed cause; text for users is produced by
/// [`StoreError::user_message`] at display time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub operation: FileOperation,
    pub error: FileDeckError,
}

impl StoreError {
    pub fn new(operation: FileOperation, error: FileDeckError) -> Self {
        Self { operation, error }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn user_message(&self, locale: Locale) -> &'static str {
        match self.kind() {
            ErrorKind::Unknown => unknown_error_message(locale),
            _ => self.operation.failure_message(locale),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} failed: {}", self.operation, self.error)
    }
}

impl std::error::Error for StoreError {}

/// Derived status of a file store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStoreStatus {
    Idle,
    Loading,
    Error(StoreError),
}
