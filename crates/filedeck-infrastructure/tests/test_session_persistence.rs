use std::sync::Arc;

use filedeck_core::router::{RouteName, Router, View};
use filedeck_core::session::{
    KeyValueStorage, PLACEHOLDER_USER_ID, SESSION_STORAGE_KEY, SessionStore,
};
use filedeck_infrastructure::{FileDeckPaths, FileLocalStorage};
use tempfile::TempDir;

fn storage(paths: &FileDeckPaths) -> Arc<FileLocalStorage> {
    Arc::new(FileLocalStorage::new(paths.local_storage_file()))
}

#[test]
fn test_login_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let paths = FileDeckPaths::new(Some(temp_dir.path().to_path_buf())).unwrap();

    let mut store = SessionStore::load(storage(&paths)).unwrap();
    store.login("alice").unwrap();

    // A fresh store over the same file sees the session
    let restored = SessionStore::load(storage(&paths)).unwrap();
    let session = restored.session().expect("session should be restored");
    assert_eq!(session.id, PLACEHOLDER_USER_ID);
    assert_eq!(session.name, "alice");

    let raw = storage(&paths).get_item(SESSION_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(raw, r#"{"id":"user123","name":"alice"}"#);
}

#[test]
fn test_logout_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let paths = FileDeckPaths::new(Some(temp_dir.path().to_path_buf())).unwrap();

    let mut store = SessionStore::load(storage(&paths)).unwrap();
    store.login("alice").unwrap();
    store.logout().unwrap();

    let restored = SessionStore::load(storage(&paths)).unwrap();
    assert!(!restored.is_authenticated());
    assert_eq!(storage(&paths).get_item(SESSION_STORAGE_KEY).unwrap(), None);
}

#[test]
fn test_corrupt_entry_is_discarded_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let paths = FileDeckPaths::new(Some(temp_dir.path().to_path_buf())).unwrap();
    storage(&paths)
        .set_item(SESSION_STORAGE_KEY, "{not json")
        .unwrap();

    let store = SessionStore::load(storage(&paths)).unwrap();
    assert!(!store.is_authenticated());
    assert_eq!(storage(&paths).get_item(SESSION_STORAGE_KEY).unwrap(), None);
}

#[test]
fn test_restored_session_passes_guard() {
    let temp_dir = TempDir::new().unwrap();
    let paths = FileDeckPaths::new(Some(temp_dir.path().to_path_buf())).unwrap();
    let mut router = Router::default();

    let anonymous = SessionStore::load(storage(&paths)).unwrap();
    let location = router.push("/files", &anonymous).unwrap();
    assert_eq!(location.name, Some(RouteName::Login));

    SessionStore::load(storage(&paths))
        .unwrap()
        .login("bob")
        .unwrap();

    let restored = SessionStore::load(storage(&paths)).unwrap();
    let location = router.push("/files", &restored).unwrap();
    assert_eq!(location.view, View::FileList);
}
