//! Domain layer of filedeck.
//!
//! Holds the two client-side stores (session and files), the router with
//! its authentication guard, and the shared error and configuration types.
//! Nothing here performs I/O directly: durable storage and the remote
//! collection are reached through the [`session::KeyValueStorage`] and
//! [`files::FileRepository`] traits, implemented in `filedeck-infrastructure`.

pub mod config;
pub mod error;
pub mod files;
pub mod router;
pub mod session;

// Re-export common error type
pub use error::{FileDeckError, Result};
