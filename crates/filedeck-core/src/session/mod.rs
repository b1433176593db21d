//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the authenticated identity
//! - `storage`: durable key/value storage abstraction the session persists into
//! - `store`: the session store (login / logout / is_authenticated)

mod model;
mod storage;
mod store;

pub use model::{PLACEHOLDER_USER_ID, Session};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{AuthState, SESSION_STORAGE_KEY, SessionStore};
