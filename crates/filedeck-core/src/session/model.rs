//! Session domain model.

use serde::{Deserialize, Serialize};

/// Identifier given to every session created by [`SessionStore::login`].
///
/// There is no identity provider behind filedeck; the id only exists so
/// the persisted shape stays `{ id, name }`.
///
/// [`SessionStore::login`]: super::SessionStore::login
pub const PLACEHOLDER_USER_ID: &str = "user123";

/// The currently authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Display name entered at login
    pub name: String,
}

impl Session {
    /// Creates a session for `name` with the placeholder id.
    pub fn for_name(name: impl Into<String>) -> Self {
        Self {
            id: PLACEHOLDER_USER_ID.to_string(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_name_uses_placeholder_id() {
        let session = Session::for_name("alice");
        assert_eq!(session.id, PLACEHOLDER_USER_ID);
        assert_eq!(session.name, "alice");
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Session::for_name("bob")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "user123", "name": "bob" }));
    }
}
