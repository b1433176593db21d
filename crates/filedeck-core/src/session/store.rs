//! Session store.
//!
//! Holds the current [`Session`] and keeps it mirrored in durable storage
//! under [`SESSION_STORAGE_KEY`].

use std::sync::Arc;

use super::model::Session;
use super::storage::KeyValueStorage;
use crate::error::Result;

/// Durable storage key holding the JSON-serialized session.
pub const SESSION_STORAGE_KEY: &str = "user";

/// Read-only view of authentication state, consulted by the route guard.
pub trait AuthState {
    fn is_authenticated(&self) -> bool;
}

impl AuthState for bool {
    fn is_authenticated(&self) -> bool {
        *self
    }
}

/// Holds the authenticated identity and persists it.
///
/// Invariant: once `login` or `logout` returns, the in-memory session and
/// the stored entry agree. Writes go to storage first; memory is only
/// updated after the write succeeded.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    session: Option<Session>,
}

impl SessionStore {
    /// Restores the session from `storage`.
    ///
    /// A missing entry means no session. An entry that does not decode is
    /// treated as no session too: it is logged and removed so storage and
    /// memory agree. Only a failure to read the storage itself is an error.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self> {
        let session = match storage.get_item(SESSION_STORAGE_KEY)? {
            None => None,
            Some(raw) => match serde_json::from_str::<Option<Session>>(&raw) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(
                        "[SessionStore] Discarding undecodable stored session: {}",
                        e
                    );
                    storage.remove_item(SESSION_STORAGE_KEY)?;
                    None
                }
            },
        };

        if let Some(ref s) = session {
            tracing::debug!("[SessionStore] Restored session for '{}'", s.name);
        }

        Ok(Self { storage, session })
    }

    /// Logs in as `name` with the placeholder user id.
    ///
    /// No validation and no network round-trip.
    pub fn login(&mut self, name: impl Into<String>) -> Result<&Session> {
        let session = Session::for_name(name);
        let raw = serde_json::to_string(&session)?;
        self.storage.set_item(SESSION_STORAGE_KEY, &raw)?;

        tracing::info!("[SessionStore] Logged in as '{}'", session.name);
        Ok(self.session.insert(session))
    }

    /// Clears the session. Idempotent.
    pub fn logout(&mut self) -> Result<()> {
        self.storage.remove_item(SESSION_STORAGE_KEY)?;
        if let Some(previous) = self.session.take() {
            tracing::info!("[SessionStore] Logged out '{}'", previous.name);
        }
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

impl AuthState for SessionStore {
    fn is_authenticated(&self) -> bool {
        SessionStore::is_authenticated(self)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
