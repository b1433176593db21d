//! Error types for filedeck.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Coarse classification of a [`FileDeckError`].
///
/// Callers that need to branch on the failure cause (retry hints, exit
/// codes, message selection) match on the kind instead of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    Network,
    HttpStatus,
    Decode,
    Io,
    Config,
    NotFound,
    Unknown,
}

/// A shared error type for the whole filedeck workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileDeckError {
    /// Transport failure: connection refused, DNS, timeout, reset.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// A payload or stored value could not be decoded.
    #[error("Decode error: {format} - {message}")]
    Decode {
        format: String, // "JSON", "TOML"
        message: String,
    },

    /// File system error
    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No {entity_type} with id '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Anything that does not fit the categories above.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl FileDeckError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    pub fn decode(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown(message.into())
    }

    // ============================================================================
    // Classification
    // ============================================================================

    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Io { .. } => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Config,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || self.status() == Some(404)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<std::io::Error> for FileDeckError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} ({:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FileDeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode("JSON", err.to_string())
    }
}

impl From<toml::de::Error> for FileDeckError {
    fn from(err: toml::de::Error) -> Self {
        Self::decode("TOML", err.to_string())
    }
}

impl From<toml::ser::Error> for FileDeckError {
    fn from(err: toml::ser::Error) -> Self {
        Self::decode("TOML", err.to_string())
    }
}

/// A type alias for `Result<T, FileDeckError>`.
pub type Result<T> = std::result::Result<T, FileDeckError>;
